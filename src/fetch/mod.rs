// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Chrome desktop UA; the portal serves a reduced page to unknown agents.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/89.0.4389.128 Safari/537.36";

const BASE_URL: &str = "https://e-services.judiciary.hk/dcl";

/// A court offering a cause list for some date.
#[derive(Debug, Clone)]
pub struct Court {
    pub code: String,
    pub name: String,
}

pub fn client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("building http client")
}

async fn get_text(client: &Client, url: &str) -> Result<String> {
    let url = Url::parse(url).with_context(|| format!("parsing url {url}"))?;
    client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {url}"))?
        .error_for_status()?
        .text()
        .await
        .with_context(|| format!("reading body from {url}"))
}

/// Fetch the date codes the portal currently offers.
pub async fn date_range(client: &Client) -> Result<Vec<String>> {
    let url = format!("{BASE_URL}/index.jsp?lang=tc");
    let html = get_text(client, &url).await?;
    Ok(parse_date_range(&html))
}

/// Fetch the courts with a published list for `date_code`.
pub async fn avail_courts(client: &Client, date_code: &str) -> Result<Vec<Court>> {
    let url = format!("{BASE_URL}/index.jsp?lang=tc&date={date_code}&mode=view");
    let html = get_text(client, &url).await?;
    Ok(parse_avail_courts(&html))
}

/// The cause-list page URL for one date/court pair; recorded in the parse
/// result as its source.
pub fn causes_url(date_code: &str, court_code: &str) -> String {
    format!("{BASE_URL}/view.jsp?lang=tc&date={date_code}&court={court_code}")
}

/// Fetch the raw cause-list markup for one date/court pair.
pub async fn causes_page(client: &Client, date_code: &str, court_code: &str) -> Result<String> {
    get_text(client, &causes_url(date_code, court_code)).await
}

fn parse_date_range(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("#dclDateOptions td").expect("date-option selector");
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("id"))
        .map(|id| id.strip_prefix("dclDate").unwrap_or(id).to_string())
        .collect()
}

fn parse_avail_courts(html: &str) -> Vec<Court> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("select#dclCourt option").expect("court-option selector");
    document
        .select(&selector)
        .skip(1) // placeholder option
        .filter_map(|el| {
            let name = el.text().collect::<String>().trim().to_string();
            // only entries flagged with the checked marker carry a list
            if !name.contains("☑︎") {
                return None;
            }
            let code = el.value().attr("value")?.to_string();
            Some(Court { code, name })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_range_comes_from_cell_ids() {
        let html = r#"<div id="dclDateOptions"><table><tr>
<td id="dclDate16042021">16/04</td>
<td id="dclDate17042021">17/04</td>
</tr></table></div>"#;
        assert_eq!(parse_date_range(html), vec!["16042021", "17042021"]);
    }

    #[test]
    fn court_list_skips_placeholder_and_unchecked_entries() {
        let html = r#"<select id="dclCourt">
<option value="">please choose</option>
<option value="DC">District Court ☑︎</option>
<option value="CRC">Coroner's Court</option>
<option value="KTMAG">Kwun Tong Magistrates ☑︎</option>
</select>"#;
        let courts = parse_avail_courts(html);
        let codes: Vec<_> = courts.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["DC", "KTMAG"]);
        assert!(courts[0].name.starts_with("District Court"));
    }

    #[test]
    fn causes_url_carries_both_identifiers() {
        assert_eq!(
            causes_url("16042021", "KTMAG"),
            "https://e-services.judiciary.hk/dcl/view.jsp?lang=tc&date=16042021&court=KTMAG"
        );
    }
}
