use clap::{Args, Subcommand, ValueEnum};

use crate::models::{ContactSubmission, MessageStatus};
use crate::store::ContactStore;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct MessageCommand {
    #[command(subcommand)]
    pub command: MessageSubcommand,
}

#[derive(Subcommand)]
pub enum MessageSubcommand {
    /// Submit a new contact message
    Submit {
        /// Sender name
        #[arg(long)]
        name: String,

        /// Sender email address
        #[arg(long)]
        email: String,

        /// Message subject
        #[arg(long)]
        subject: String,

        /// Message body
        #[arg(long)]
        message: String,
    },

    /// List stored messages, newest first
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Filter by status (new, read, replied)
        #[arg(long)]
        status: Option<String>,
    },

    /// Set the status of a message
    Mark {
        /// Message ID
        id: String,

        /// New status (new, read, replied)
        status: String,
    },

    /// Show the number of unread messages
    Unread,
}

impl MessageCommand {
    pub async fn run(&self, store: &ContactStore) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            MessageSubcommand::Submit {
                name,
                email,
                subject,
                message,
            } => {
                let submission = ContactSubmission::new(name, email, subject, message);
                let id = store.create(&submission).await?;
                println!("Saved message {}", id);
            }

            MessageSubcommand::List { format, status } => {
                let mut messages = store.list_all().await?;
                if let Some(s) = status {
                    let wanted: MessageStatus = s.parse()?;
                    messages.retain(|m| m.status == wanted);
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&messages)?);
                    }
                    OutputFormat::Text => {
                        if messages.is_empty() {
                            println!("No messages");
                        }
                        for m in &messages {
                            println!("{}  [{}]  {} <{}>", m.id, m.status, m.name, m.email);
                            println!(
                                "    {}  {}",
                                m.created_at.format("%Y-%m-%d %H:%M"),
                                m.subject
                            );
                        }
                    }
                }
            }

            MessageSubcommand::Mark { id, status } => {
                let status: MessageStatus = status.parse()?;
                store.update_status(id, status).await?;
                println!("Message {} marked {}", id, status);
            }

            MessageSubcommand::Unread => {
                println!("{}", store.unread_count().await);
            }
        }

        Ok(())
    }
}
