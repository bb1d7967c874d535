use anyhow::Context;
use serde::Serialize;
use synzy_core::{Session, UserRecord, UserType};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionCommands;
use crate::commands::shared::parse_object;
use crate::context::AppContext;
use crate::output::output;

/// Never includes the token itself.
#[derive(Debug, Serialize)]
struct SessionResponse {
    signed_in: bool,
    authenticated: bool,
    user_type: Option<UserType>,
    user_id: Option<String>,
}

impl SessionResponse {
    fn from_session(session: Option<&Session>) -> Self {
        Self {
            signed_in: session.is_some(),
            authenticated: session.is_some_and(|s| !s.token().is_empty()),
            user_type: session.map(Session::user_type),
            user_id: session.and_then(Session::canonical_id).map(str::to_string),
        }
    }
}

pub fn handle(action: &SessionCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let sessions = ctx.sessions();
    match action {
        SessionCommands::Show => {}
        SessionCommands::SignIn { user, token } => {
            let fields = parse_object(user, "user record")?;
            let record: UserRecord = serde_json::from_value(serde_json::Value::Object(fields))
                .context("user record has an invalid shape")?;
            sessions.sign_in(Session::new(record, token.clone()))?;
        }
        SessionCommands::Update { patch } => {
            sessions.update_profile(parse_object(patch, "profile patch")?)?;
        }
        SessionCommands::SignOut => {
            sessions.sign_out();
            // The list may live under a configured key the session store does not know.
            if let Err(error) = ctx.comparison().clear() {
                tracing::warn!(%error, "failed to clear comparison list on sign-out");
            }
        }
    }
    output(&SessionResponse::from_session(sessions.current().as_ref()), flags.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::cli::subcommands::CompareCommands;
    use crate::commands::compare;
    use synzy_config::SynzyConfig;

    #[test]
    fn sign_out_clears_comparison_under_configured_key() {
        let dir = tempfile::TempDir::new().expect("tmp dir");
        let flags = GlobalFlags {
            format: OutputFormat::Raw,
            quiet: true,
            verbose: false,
            storage: Some(dir.path().join("storage.json")),
        };
        let mut config = SynzyConfig::default();
        config.storage.comparison_key = "compare".into();
        let ctx = AppContext::init(config, &flags).expect("context");

        let sign_in = SessionCommands::SignIn {
            user: r#"{"_id":"u1","userType":"student"}"#.into(),
            token: "jwt".into(),
        };
        handle(&sign_in, &ctx, &flags).expect("sign in");
        let toggle = CompareCommands::Toggle { entity: "a".into() };
        compare::handle(&toggle, &ctx, &flags).expect("toggle");
        assert_eq!(ctx.comparison().len(), 1);

        handle(&SessionCommands::SignOut, &ctx, &flags).expect("sign out");

        assert!(ctx.sessions().current().is_none());
        assert!(ctx.comparison().is_empty());
    }
}
