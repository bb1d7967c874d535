use clap::Subcommand;

/// Session lifecycle commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// Show the persisted session.
    Show,
    /// Store a session issued by the login endpoint.
    SignIn {
        /// User record as JSON.
        #[arg(long)]
        user: String,
        /// Bearer token.
        #[arg(long)]
        token: String,
    },
    /// Merge profile fields (JSON object) into the stored user record.
    Update { patch: String },
    /// Drop the session and every session-scoped key.
    SignOut,
}
