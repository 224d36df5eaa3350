//! Steps that drive the browser

use kwiga_browser::Locator;
use tracing::debug;

use crate::context::ExecutionContext;
use crate::error::{StepError, StepOutcome};
use crate::pages::{HomePage, Language};

const HEADER_DROPDOWN: &str = ".header__menu_item_dropdown";

/// `I open "home"`
pub(super) async fn open_home(ctx: &mut ExecutionContext) -> StepOutcome {
    let (base_url, timeout) = (ctx.config.base_url.clone(), ctx.config.explicit_wait());
    let session = ctx.session().await?;
    HomePage::new(session, &base_url, timeout).open_home().await?;
    Ok(())
}

/// `I search course "<query>"`
pub(super) async fn search_course(ctx: &mut ExecutionContext, query: &str) -> StepOutcome {
    let (base_url, timeout) = (ctx.config.base_url.clone(), ctx.config.explicit_wait());
    let session = ctx.session().await?;
    HomePage::new(session, &base_url, timeout).search_course(query).await?;
    Ok(())
}

/// `I switch language to "<lang>"`
pub(super) async fn switch_language(ctx: &mut ExecutionContext, name: &str) -> StepOutcome {
    let language = Language::from_name(name);
    let (base_url, timeout) = (ctx.config.base_url.clone(), ctx.config.explicit_wait());
    let session = ctx.session().await?;
    HomePage::new(session, &base_url, timeout)
        .switch_language(language)
        .await?;
    Ok(())
}

/// `I click header menu "<text>"` and `I click footer link "<text>"`
pub(super) async fn click_link(ctx: &mut ExecutionContext, text: &str) -> StepOutcome {
    click(ctx, &Locator::link_text(text)).await
}

/// `I click button "<label>"`: any link or button whose text is or contains the label
pub(super) async fn click_button(ctx: &mut ExecutionContext, label: &str) -> StepOutcome {
    click(ctx, &Locator::xpath(button_xpath(label))).await
}

/// `I click css "<selector>"`
pub(super) async fn click_css(ctx: &mut ExecutionContext, selector: &str) -> StepOutcome {
    click(ctx, &Locator::css(selector)).await
}

/// `I click header dropdown "<text>"`: first dropdown whose text contains the label, ignoring case.
///
/// Scans whatever the header currently renders. Hidden duplicates report no
/// text, so they never match.
pub(super) async fn click_header_dropdown(ctx: &mut ExecutionContext, label: &str) -> StepOutcome {
    let wanted = label.trim().to_lowercase();
    let session = ctx.session().await?;

    let items = session.find_all(&Locator::css(HEADER_DROPDOWN)).await?;
    let mut available = Vec::with_capacity(items.len());

    for item in &items {
        let text = session.text(item).await?;
        if text.trim().to_lowercase().contains(&wanted) {
            session.click(item).await?;
            return Ok(());
        }
        available.push(text.trim().to_string());
    }

    Err(StepError::Assertion(format!(
        "Header dropdown with text \"{}\" not found. Available dropdowns: {:?}",
        label, available
    )))
}

/// `I switch to new tab`: the most recently opened window, if there is more than one
pub(super) async fn switch_to_new_tab(ctx: &mut ExecutionContext) -> StepOutcome {
    let session = ctx.session().await?;
    let handles = session.window_handles().await?;
    if handles.len() > 1 {
        if let Some(newest) = handles.last() {
            debug!("Switching to window {}", newest);
            session.switch_to_window(newest).await?;
        }
    }
    Ok(())
}

async fn click(ctx: &mut ExecutionContext, locator: &Locator) -> StepOutcome {
    let timeout = ctx.config.explicit_wait();
    let session = ctx.session().await?;
    let element = session.find_element(locator, timeout).await?;
    session.click(&element).await?;
    Ok(())
}

fn button_xpath(label: &str) -> String {
    let literal = xpath_literal(label);
    format!(
        "//a[normalize-space(.)={lit} or contains(normalize-space(.), {lit})] \
         | //button[normalize-space(.)={lit} or contains(normalize-space(.), {lit})]",
        lit = literal
    )
}

/// Quote `s` as an XPath 1.0 string literal
fn xpath_literal(s: &str) -> String {
    if !s.contains('\'') {
        format!("'{}'", s)
    } else if !s.contains('"') {
        format!("\"{}\"", s)
    } else {
        let parts: Vec<String> = s.split('\'').map(|p| format!("'{}'", p)).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}
