use crate::error::AcopioError;
use crate::profile::schema::ExtractionProfile;
use reqwest::blocking::Client;

pub const CONFIRMED_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_confirmed_global.csv";
pub const DEATHS_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_deaths_global.csv";
pub const RECOVERED_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_recovered_global.csv";

/// Blocking HTTP fetcher. Each run re-fetches everything from scratch.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn text(&self, url: &str) -> Result<String, AcopioError> {
        self.get(url)?
            .text()
            .map_err(|e| AcopioError::Http(format!("failed to read body from {url}: {e}")))
    }

    pub fn bytes(&self, url: &str) -> Result<Vec<u8>, AcopioError> {
        Ok(self
            .get(url)?
            .bytes()
            .map_err(|e| AcopioError::Http(format!("failed to read body from {url}: {e}")))?
            .to_vec())
    }

    /// Locate the case-table PDF on the bulletin page and download it.
    pub fn case_report(&self, profile: &ExtractionProfile) -> Result<Vec<u8>, AcopioError> {
        let html = self.text(&profile.bulletin_url)?;
        let href = find_report_href(&html, &profile.link_pattern).ok_or_else(|| {
            AcopioError::ReportLinkNotFound {
                pattern: profile.link_pattern.clone(),
            }
        })?;
        self.bytes(&resolve_href(&href, &profile.site_root))
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, AcopioError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| AcopioError::Http(format!("request to {url} failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(AcopioError::Http(format!(
                "request to {url} failed with status {}",
                resp.status()
            )));
        }
        Ok(resp)
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan anchor tags for the first href containing the given pattern.
pub fn find_report_href(html: &str, pattern: &str) -> Option<String> {
    let mut rest = html;
    while let Some(pos) = rest.find("<a") {
        let tag = &rest[pos..];
        let tag = match tag.find('>') {
            Some(end) => &tag[..end],
            None => tag,
        };
        if let Some(href) = parse_attr(tag, "href") {
            if href.contains(pattern) {
                return Some(href.to_string());
            }
        }
        rest = &rest[pos + 2..];
    }
    None
}

fn resolve_href(href: &str, site_root: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{site_root}{href}")
    }
}

fn parse_attr<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{}=\"", name);
    let start = tag.find(&needle)? + needle.len();
    let rest = &tag[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}
