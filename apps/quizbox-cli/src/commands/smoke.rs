use super::{fail, pass};
use crate::api_client::ApiClient;
use crate::error::CliError;
use console::style;
use quizbox_shared::api::ListResponse;
use quizbox_shared::quiz::QuizSummary;
use reqwest::StatusCode;

/// Tally of check outcomes.
#[derive(Debug, Default)]
pub struct Report {
    passed: usize,
    failed: usize,
}

impl Report {
    pub fn record(&mut self, label: &str, expected: StatusCode, actual: anyhow::Result<StatusCode>) {
        match actual {
            Ok(status) if status == expected => {
                self.passed += 1;
                pass(label);
            }
            Ok(status) => {
                self.failed += 1;
                fail(label, &format!("expected {}, got {}", expected, status));
            }
            Err(e) => {
                self.failed += 1;
                fail(label, &format!("{:#}", e));
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

pub async fn run(client: &ApiClient) -> Result<(), CliError> {
    let mut report = Report::default();

    report.record("GET /health", StatusCode::OK, client.get_status("/health", false).await);
    report.record("GET /api/ads", StatusCode::OK, client.get_status("/api/ads", false).await);
    report.record(
        "GET /api/ads?slot=sidebar",
        StatusCode::OK,
        client.get_status("/api/ads?slot=sidebar", false).await,
    );
    report.record("GET /api/quiz", StatusCode::OK, client.get_status("/api/quiz", false).await);

    match client.get::<ListResponse<QuizSummary>>("/api/quiz").await {
        Ok(list) => match list.items.first() {
            Some(quiz) => {
                let path = format!("/api/quiz/{}", quiz.slug);
                report.record(&format!("GET {}", path), StatusCode::OK, client.get_status(&path, false).await);
            }
            None => println!("  {} no published quizzes to fetch", style("SKIP").yellow().bold()),
        },
        Err(e) => report.record("GET /api/quiz (decode)", StatusCode::OK, Err(e)),
    }

    report.record(
        "GET /api/quiz/<missing>",
        StatusCode::NOT_FOUND,
        client.get_status("/api/quiz/definitely-not-a-real-quiz", false).await,
    );
    report.record(
        "GET /api/admin/quiz without token",
        StatusCode::UNAUTHORIZED,
        client.get_status("/api/admin/quiz", false).await,
    );
    if client.has_token() {
        report.record(
            "GET /api/admin/quiz with token",
            StatusCode::OK,
            client.get_status("/api/admin/quiz", true).await,
        );
    } else {
        println!("  {} admin checks (no token)", style("SKIP").yellow().bold());
    }

    println!(
        "{} passed, {} failed",
        style(report.passed).green().bold(),
        style(report.failed).red().bold()
    );
    if report.is_success() {
        Ok(())
    } else {
        Err(anyhow::anyhow!("{} smoke checks failed", report.failed).into())
    }
}
