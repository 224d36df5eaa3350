//! Configuration steps; these never touch the browser

use tracing::debug;

use crate::context::ExecutionContext;
use crate::error::StepOutcome;
use crate::registry::StepArgs;

/// `app baseUrl "<url>"`
pub(super) fn set_base_url(ctx: &mut ExecutionContext, args: &StepArgs) -> StepOutcome {
    ctx.config.base_url = args.get(0)?.to_string();
    debug!("Base URL set to {}", ctx.config.base_url);
    Ok(())
}

/// `browser "<name>" headless <true|false>`
///
/// The name is not validated here; an unsupported browser fails when the
/// session is created.
pub(super) fn set_browser(ctx: &mut ExecutionContext, args: &StepArgs) -> StepOutcome {
    ctx.config.browser = args.get(0)?.to_string();
    ctx.config.headless = args.get(1)?.eq_ignore_ascii_case("true");
    debug!("Browser set to {} (headless={})", ctx.config.browser, ctx.config.headless);
    Ok(())
}
