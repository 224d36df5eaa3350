//! Kwiga home page: search and language switch

use std::time::Duration;

use kwiga_browser::{BrowserResult, BrowserSession, Locator};

use super::BasePage;

const SEARCH_INPUT: &str = "//input[contains(@placeholder, 'Щоб Ви хотіли вивчити сьогодні?')]";
const SEARCH_BUTTON: &str = ".catalog-search__button";

/// Site language, as far as the home page is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Ukrainian,
}

impl Language {
    /// Anything that is not a Ukrainian alias means English
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "uk" | "ua" | "ukrainian" | "українська" => Language::Ukrainian,
            _ => Language::English,
        }
    }

    pub fn home_path(&self) -> &'static str {
        match self {
            Language::English => "/",
            Language::Ukrainian => "/ua",
        }
    }

    /// Headline that only appears on the home page in this language
    pub fn marker(&self) -> &'static str {
        match self {
            Language::English => "All tools for a successful business",
            Language::Ukrainian => "Усі інструменти для успішного бізнесу",
        }
    }
}

pub struct HomePage<'a> {
    page: BasePage<'a>,
}

impl<'a> HomePage<'a> {
    pub fn new(session: &'a mut dyn BrowserSession, base_url: &str, timeout: Duration) -> Self {
        Self {
            page: BasePage::new(session, base_url, timeout),
        }
    }

    pub async fn open_home(&mut self) -> BrowserResult<()> {
        self.page.open("/").await
    }

    pub async fn search_course(&mut self, query: &str) -> BrowserResult<()> {
        let input = self.page.find_visible(&Locator::xpath(SEARCH_INPUT)).await?;
        self.page.session.clear(&input).await?;
        self.page.session.send_keys(&input, query).await?;

        let button = self.page.find_visible(&Locator::css(SEARCH_BUTTON)).await?;
        self.page.session.click(&button).await
    }

    pub async fn switch_language(&mut self, language: Language) -> BrowserResult<()> {
        self.page.open(language.home_path()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_aliases() {
        for alias in ["uk", "UA", "ukrainian", "Українська"] {
            assert_eq!(Language::from_name(alias), Language::Ukrainian, "{}", alias);
        }
        assert_eq!(Language::from_name("en"), Language::English);
        assert_eq!(Language::from_name("pl"), Language::English);
    }

    #[test]
    fn test_language_paths() {
        assert_eq!(Language::Ukrainian.home_path(), "/ua");
        assert_eq!(Language::English.home_path(), "/");
    }
}
