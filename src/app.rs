//! Wires the real collaborators together for one invocation

use crate::build::BuildOrchestrator;
use crate::cli::Cli;
use crate::config::loader::ConfigLoader;
use crate::controller::SessionController;
use crate::error::Result;
use crate::execution::DirectExecutor;
use crate::judge::PromptJudge;
use crate::models::Verdict;
use crate::patch::GitPatchManager;
use crate::pty::TerminalProxy;

/// Load configuration, run one bisect step and return its verdict.
///
/// Errors here happen before any stage ran; the caller maps them to Skip.
pub fn run(cli: &Cli) -> Result<Verdict> {
    let config = ConfigLoader::load(cli.config.as_deref())?;
    let session = cli.to_session(&config)?;
    let width = config.session.banner_width;
    debug!("Session: {:?}", session);

    let executor = DirectExecutor::new();
    let proxy = TerminalProxy::new(session.quit_key);

    let mut controller = SessionController::new(
        session,
        GitPatchManager::new(executor),
        BuildOrchestrator::new(executor, config.build).with_banner_width(width),
        proxy,
        PromptJudge::stdio(),
    )
    .with_banner_width(width);

    Ok(controller.run())
}
