use crate::models::{AppError, AppResult};
use crate::services::WargearClient;
use crate::utils::{parse_flexible, validate_player_name};
use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::debug;

const LAST_VISIT_LABEL: &str = "Last Visit";

/// HTML of a `/players/info/<player>` page.
pub struct ProfilePage(pub String);

impl ProfilePage {
    /// Text of the "Last Visit" value cell in the `data` table.
    ///
    /// The value is the second sibling node after the label cell, counting the
    /// whitespace text node between the two `<td>`s. Any other layout is an error.
    pub fn last_visit_text(&self) -> AppResult<String> {
        let document = Html::parse_document(&self.0);
        let table_selector = selector("table.data")?;
        let cell_selector = selector("td")?;

        let table = document
            .select(&table_selector)
            .next()
            .ok_or_else(|| AppError::ScrapeError("no table with class \"data\"".to_string()))?;

        let label = table
            .select(&cell_selector)
            .find(|cell| cell.text().collect::<String>() == LAST_VISIT_LABEL)
            .ok_or_else(|| AppError::ScrapeError(format!("no \"{}\" cell", LAST_VISIT_LABEL)))?;

        let value = label.next_siblings().nth(1).ok_or_else(|| {
            AppError::ScrapeError(format!("no value after \"{}\" cell", LAST_VISIT_LABEL))
        })?;

        let text = match ElementRef::wrap(value) {
            Some(element) => element.text().collect::<String>(),
            None => value
                .value()
                .as_text()
                .map(|text| text.trim().to_string())
                .unwrap_or_default(),
        };

        Ok(text.trim().to_string())
    }

    /// Profiles carry no timezone, so neither does the result.
    pub fn last_visit(&self) -> AppResult<NaiveDateTime> {
        parse_flexible(&self.last_visit_text()?)
    }
}

fn selector(css: &str) -> AppResult<Selector> {
    Selector::parse(css)
        .map_err(|e| AppError::ScrapeError(format!("bad selector {}: {}", css, e)))
}

pub struct ProfileScraper {
    http_client: Arc<WargearClient>,
}

impl ProfileScraper {
    pub fn new(http_client: Arc<WargearClient>) -> Self {
        Self { http_client }
    }

    pub async fn last_site_visit_for(&self, player: &str) -> AppResult<NaiveDateTime> {
        validate_player_name(player)?;
        let page = self.http_client.fetch_profile(player).await?;
        let last_visit = page.last_visit()?;
        debug!(player, %last_visit, "Parsed last site visit");
        Ok(last_visit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PROFILE: &str = include_str!("../../tests/fixtures/profile_last_visit.html");
    const MISSING_TABLE: &str = include_str!("../../tests/fixtures/profile_missing_table.html");

    fn expected() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 11, 14)
            .unwrap()
            .and_hms_opt(22, 13, 20)
            .unwrap()
    }

    #[test]
    fn test_last_visit_from_fixture() {
        let page = ProfilePage(PROFILE.to_string());
        assert_eq!(page.last_visit_text().unwrap(), "2023-11-14 22:13:20");
        assert_eq!(page.last_visit().unwrap(), expected());
    }

    #[test]
    fn test_missing_table_fails() {
        let page = ProfilePage(MISSING_TABLE.to_string());
        assert!(matches!(page.last_visit(), Err(AppError::ScrapeError(_))));
    }

    #[test]
    fn test_missing_label_fails() {
        let page = ProfilePage(
            "<table class=\"data\">\n<tr>\n<td>Joined</td>\n<td>2019-03-02</td>\n</tr>\n</table>"
                .to_string(),
        );
        assert!(matches!(page.last_visit(), Err(AppError::ScrapeError(_))));
    }

    #[test]
    fn test_label_match_is_exact() {
        let page = ProfilePage(
            concat!(
                "<table class=\"data\">\n<tr>\n",
                "<td>Last Visitor</td>\n<td>2019-03-02</td>\n",
                "</tr>\n</table>",
            )
            .to_string(),
        );
        assert!(matches!(page.last_visit(), Err(AppError::ScrapeError(_))));
    }

    #[test]
    fn test_cells_without_whitespace_have_no_second_sibling() {
        let page = ProfilePage(
            concat!(
                "<table class=\"data\"><tr>",
                "<td>Last Visit</td><td>2023-11-14 22:13:20</td>",
                "</tr></table>",
            )
            .to_string(),
        );
        assert!(matches!(page.last_visit(), Err(AppError::ScrapeError(_))));
    }

    #[test]
    fn test_unparseable_value_fails() {
        let page = ProfilePage(
            "<table class=\"data\">\n<tr>\n<td>Last Visit</td>\n<td>Never</td>\n</tr>\n</table>"
                .to_string(),
        );
        assert_eq!(page.last_visit_text().unwrap(), "Never");
        assert!(matches!(page.last_visit(), Err(AppError::DateParse(_))));
    }

    #[tokio::test]
    async fn test_last_site_visit_for_fetches_profile() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/players/info/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PROFILE))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = WargearClient::new(&mock_server.uri()).unwrap();
        let scraper = ProfileScraper::new(Arc::new(client));
        let last_visit = scraper.last_site_visit_for("alice").await.unwrap();
        assert_eq!(last_visit, expected());
    }

    #[tokio::test]
    async fn test_empty_player_rejected() {
        let scraper =
            ProfileScraper::new(Arc::new(WargearClient::new("http://www.wargear.net").unwrap()));
        let result = scraper.last_site_visit_for("  ").await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
