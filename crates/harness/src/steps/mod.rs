//! Built-in step library
//!
//! [`register_defaults`] binds every [`BuiltinStep`] in declaration order.
//! Custom steps registered afterwards are shadowed by any built-in pattern
//! that also matches their text.

use async_trait::async_trait;

use crate::context::ExecutionContext;
use crate::error::{HarnessResult, StepOutcome};
use crate::registry::{StepAction, StepArgs, StepRegistry};

mod browser;
mod checks;
mod setup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinStep {
    SetBaseUrl,
    SetBrowser,
    OpenHome,
    SearchCourse,
    ExpectResultTitle,
    SwitchLanguage,
    ExpectPageLanguage,
    ClickHeaderMenu,
    ClickFooterLink,
    ClickButton,
    ClickCss,
    ClickHeaderDropdown,
    ExpectPageContainsText,
    ExpectCurrentUrlContains,
    SwitchToNewTab,
}

impl BuiltinStep {
    /// Registration order
    pub const ALL: [BuiltinStep; 15] = [
        BuiltinStep::SetBaseUrl,
        BuiltinStep::SetBrowser,
        BuiltinStep::OpenHome,
        BuiltinStep::SearchCourse,
        BuiltinStep::ExpectResultTitle,
        BuiltinStep::SwitchLanguage,
        BuiltinStep::ExpectPageLanguage,
        BuiltinStep::ClickHeaderMenu,
        BuiltinStep::ClickFooterLink,
        BuiltinStep::ClickButton,
        BuiltinStep::ClickCss,
        BuiltinStep::ClickHeaderDropdown,
        BuiltinStep::ExpectPageContainsText,
        BuiltinStep::ExpectCurrentUrlContains,
        BuiltinStep::SwitchToNewTab,
    ];

    pub fn pattern(&self) -> &'static str {
        match self {
            BuiltinStep::SetBaseUrl => r#"app baseUrl "(.+)""#,
            BuiltinStep::SetBrowser => r#"browser "(\w+)" headless (true|false)"#,
            BuiltinStep::OpenHome => r#"I open "home""#,
            BuiltinStep::SearchCourse => r#"I search course "(.+)""#,
            BuiltinStep::ExpectResultTitle => r#"I expect results contain title "(.+)""#,
            BuiltinStep::SwitchLanguage => r#"I switch language to "(.+)""#,
            BuiltinStep::ExpectPageLanguage => r#"I expect page language is "(.+)""#,
            BuiltinStep::ClickHeaderMenu => r#"I click header menu "(.+)""#,
            BuiltinStep::ClickFooterLink => r#"I click footer link "(.+)""#,
            BuiltinStep::ClickButton => r#"I click button "(.+)""#,
            BuiltinStep::ClickCss => r#"I click css "(.+)""#,
            BuiltinStep::ClickHeaderDropdown => r#"I click header dropdown "(.+)""#,
            BuiltinStep::ExpectPageContainsText => r#"I expect page contains text "(.+)""#,
            BuiltinStep::ExpectCurrentUrlContains => r#"I expect current url contains "(.+)""#,
            BuiltinStep::SwitchToNewTab => r"I switch to new tab",
        }
    }
}

#[async_trait]
impl StepAction for BuiltinStep {
    async fn invoke(&self, ctx: &mut ExecutionContext, args: &StepArgs) -> StepOutcome {
        match self {
            BuiltinStep::SetBaseUrl => setup::set_base_url(ctx, args),
            BuiltinStep::SetBrowser => setup::set_browser(ctx, args),
            BuiltinStep::OpenHome => browser::open_home(ctx).await,
            BuiltinStep::SearchCourse => browser::search_course(ctx, args.get(0)?).await,
            BuiltinStep::ExpectResultTitle => checks::expect_result_title(ctx, args.get(0)?).await,
            BuiltinStep::SwitchLanguage => browser::switch_language(ctx, args.get(0)?).await,
            BuiltinStep::ExpectPageLanguage => checks::expect_page_language(ctx, args.get(0)?).await,
            BuiltinStep::ClickHeaderMenu | BuiltinStep::ClickFooterLink => {
                browser::click_link(ctx, args.get(0)?).await
            }
            BuiltinStep::ClickButton => browser::click_button(ctx, args.get(0)?).await,
            BuiltinStep::ClickCss => browser::click_css(ctx, args.get(0)?).await,
            BuiltinStep::ClickHeaderDropdown => browser::click_header_dropdown(ctx, args.get(0)?).await,
            BuiltinStep::ExpectPageContainsText => {
                checks::expect_page_contains_text(ctx, args.get(0)?).await
            }
            BuiltinStep::ExpectCurrentUrlContains => {
                checks::expect_current_url_contains(ctx, args.get(0)?).await
            }
            BuiltinStep::SwitchToNewTab => browser::switch_to_new_tab(ctx).await,
        }
    }
}

/// Register the whole built-in library
pub fn register_defaults(registry: &mut StepRegistry) -> HarnessResult<()> {
    for step in BuiltinStep::ALL {
        registry.register(step.pattern(), step)?;
    }
    Ok(())
}

/// A registry holding just the built-in library
pub fn default_registry() -> HarnessResult<StepRegistry> {
    let mut registry = StepRegistry::new();
    register_defaults(&mut registry)?;
    Ok(registry)
}
