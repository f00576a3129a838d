//! GitHub GraphQL/REST client and widget-data aggregation.

use serde::Deserialize;
use tracing::warn;

const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";
const GITHUB_API_URL: &str = "https://api.github.com";

/// Aggregated numbers for the stats widget.
#[derive(Debug, Clone, PartialEq)]
pub struct GitHubStats {
    pub contributions: u64,
    pub stars: u64,
    /// Top languages across owned repos, at most five, sorted descending.
    pub top_languages: Vec<LanguageShare>,
}

/// One language's share of the owned repos.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub name: String,
    pub color: String,
    pub percentage: u32,
}

/// One repository for the project grid.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoSummary {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub language: Option<String>,
}

/// GitHub API client for the stats widget and project grid.
pub struct StatsClient {
    token: Option<String>,
    http: reqwest::Client,
}

impl StatsClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(30))
                .user_agent("beacon")
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    /// Contribution count, star total, and language breakdown for a user.
    ///
    /// Returns `None` on any failure (missing token included).
    pub async fn fetch_stats(&self, username: &str) -> Option<GitHubStats> {
        let Some(token) = &self.token else {
            warn!("github token missing, skipping stats widget");
            return None;
        };

        let query = r#"
            query($username: String!) {
              user(login: $username) {
                contributionsCollection {
                  contributionCalendar {
                    totalContributions
                  }
                }
                repositories(first: 100, ownerAffiliations: OWNER, orderBy: {field: STARGAZERS, direction: DESC}) {
                  nodes {
                    stargazers { totalCount }
                    languages(first: 1, orderBy: {field: SIZE, direction: DESC}) {
                      edges { node { name color } }
                    }
                  }
                }
              }
            }
        "#;

        let body = serde_json::json!({
            "query": query,
            "variables": { "username": username },
        });

        let response = self
            .http
            .post(GITHUB_GRAPHQL_URL)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await;

        let text = match response {
            Ok(r) if r.status().is_success() => r.text().await.ok()?,
            Ok(r) => {
                warn!(status = %r.status(), "github stats query rejected");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "github stats query failed");
                return None;
            }
        };

        match aggregate_stats(&text) {
            Some(stats) => Some(stats),
            None => {
                warn!("github stats response had no user data");
                None
            }
        }
    }

    /// Public repos for the project grid, most recently pushed first.
    ///
    /// Returns an empty list on any failure.
    pub async fn fetch_repos(&self, username: &str) -> Vec<RepoSummary> {
        let Some(token) = &self.token else {
            warn!("github token missing, skipping repo list");
            return Vec::new();
        };

        let url = format!("{GITHUB_API_URL}/users/{username}/repos?per_page=100&sort=pushed");
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json")
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => r.json().await.unwrap_or_else(|e| {
                warn!(error = %e, "github repo list did not parse");
                Vec::new()
            }),
            Ok(r) => {
                warn!(status = %r.status(), "github repo list rejected");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "github repo list failed");
                Vec::new()
            }
        }
    }
}

/// Response shape of the stats GraphQL query, only the fields we read.
#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<GraphQlData>,
}

#[derive(Deserialize)]
struct GraphQlData {
    user: Option<GraphQlUser>,
}

#[derive(Deserialize)]
struct GraphQlUser {
    #[serde(rename = "contributionsCollection")]
    contributions_collection: ContributionsCollection,
    repositories: Repositories,
}

#[derive(Deserialize)]
struct ContributionsCollection {
    #[serde(rename = "contributionCalendar")]
    contribution_calendar: ContributionCalendar,
}

#[derive(Deserialize)]
struct ContributionCalendar {
    #[serde(rename = "totalContributions")]
    total_contributions: u64,
}

#[derive(Deserialize)]
struct Repositories {
    nodes: Vec<RepoNode>,
}

#[derive(Deserialize)]
struct RepoNode {
    stargazers: Stargazers,
    languages: Languages,
}

#[derive(Deserialize)]
struct Stargazers {
    #[serde(rename = "totalCount")]
    total_count: u64,
}

#[derive(Deserialize)]
struct Languages {
    edges: Vec<LanguageEdge>,
}

#[derive(Deserialize)]
struct LanguageEdge {
    node: LanguageNode,
}

#[derive(Deserialize)]
struct LanguageNode {
    name: String,
    color: Option<String>,
}

/// Fold the raw GraphQL response into widget numbers.
fn aggregate_stats(body: &str) -> Option<GitHubStats> {
    let response: GraphQlResponse = serde_json::from_str(body).ok()?;
    let user = response.data?.user?;

    let contributions = user
        .contributions_collection
        .contribution_calendar
        .total_contributions;

    let mut stars = 0u64;
    let mut language_counts: Vec<(String, String, u32)> = Vec::new();
    let total_repos = user.repositories.nodes.len();

    for repo in &user.repositories.nodes {
        stars += repo.stargazers.total_count;
        if let Some(edge) = repo.languages.edges.first() {
            let color = edge.node.color.clone().unwrap_or_default();
            match language_counts.iter_mut().find(|(n, _, _)| *n == edge.node.name) {
                Some((_, _, count)) => *count += 1,
                None => language_counts.push((edge.node.name.clone(), color, 1)),
            }
        }
    }

    let mut top_languages: Vec<LanguageShare> = language_counts
        .into_iter()
        .map(|(name, color, count)| LanguageShare {
            name,
            color,
            percentage: (count * 100) / total_repos.max(1) as u32,
        })
        .collect();
    top_languages.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    top_languages.truncate(5);

    Some(GitHubStats {
        contributions,
        stars,
        top_languages,
    })
}
