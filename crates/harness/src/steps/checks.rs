//! Assertion steps

use kwiga_browser::{waits, BrowserError};

use crate::assertions::{assert_any_eq, assert_contains};
use crate::context::ExecutionContext;
use crate::error::{StepError, StepOutcome};
use crate::pages::{CatalogPage, Language};

/// `I expect results contain title "<title>"`
pub(super) async fn expect_result_title(ctx: &mut ExecutionContext, expected: &str) -> StepOutcome {
    let (base_url, timeout) = (ctx.config.base_url.clone(), ctx.config.explicit_wait());
    let session = ctx.session().await?;
    let titles = CatalogPage::new(session, &base_url, timeout).course_titles().await?;

    let expected = expected.to_string();
    let message = format!("Expected \"{}\" in results, got: {:?}", expected, titles);
    assert_any_eq(&titles, &expected, Some(message))
}

/// `I expect page language is "<lang>"`
pub(super) async fn expect_page_language(ctx: &mut ExecutionContext, name: &str) -> StepOutcome {
    let marker = Language::from_name(name).marker();
    let session = ctx.session().await?;
    let source = session.page_source().await?;

    assert_contains(
        &source,
        marker,
        Some(format!(
            "Expected language \"{}\" snippet \"{}\" not found on page",
            name.to_lowercase(),
            marker
        )),
    )
}

/// `I expect page contains text "<snippet>"`, polled up to the explicit wait
pub(super) async fn expect_page_contains_text(ctx: &mut ExecutionContext, snippet: &str) -> StepOutcome {
    let timeout = ctx.config.explicit_wait();
    let session = ctx.session().await?;

    match waits::wait_for_page_text(session, snippet, timeout).await {
        Ok(()) => Ok(()),
        Err(BrowserError::Timeout(_)) => Err(StepError::Assertion(format!(
            "Expected to find text \"{}\" on page, but it was not found.",
            snippet
        ))),
        Err(e) => Err(e.into()),
    }
}

/// `I expect current url contains "<part>"`
pub(super) async fn expect_current_url_contains(ctx: &mut ExecutionContext, part: &str) -> StepOutcome {
    let session = ctx.session().await?;
    let url = session.current_url().await?;

    assert_contains(
        &url,
        part,
        Some(format!("Expected current URL to contain \"{}\", got: {}", part, url)),
    )
}
