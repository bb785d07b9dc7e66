use super::{fail, pass};
use crate::api_client::ApiClient;
use crate::error::CliError;
use console::style;
use quizbox_shared::ads::{AdContent, AdStatus, NewAd};
use quizbox_shared::slots;

fn ad(name: &str, brand: &str, slot: &str, kind: &str, url: &str, link: &str, headline: Option<&str>) -> NewAd {
    NewAd {
        name: name.to_string(),
        brand: brand.to_string(),
        status: AdStatus::Active,
        slot: slot.to_string(),
        content: AdContent {
            kind: kind.to_string(),
            url: url.to_string(),
            link: link.to_string(),
            headline: headline.map(str::to_string),
            description: None,
        },
    }
}

/// House ads that fill every slot the front end renders.
pub fn house_ads() -> Vec<NewAd> {
    vec![
        ad(
            "Sidebar - Daily Quiz",
            "Quizbox",
            slots::SIDEBAR,
            "image",
            "https://cdn.quizbox.example/ads/daily-quiz-300x600.png",
            "/quiz/world-capitals-challenge",
            Some("Beat today's quiz"),
        ),
        ad(
            "Quiz Main - Newsletter",
            "Quizbox",
            slots::QUIZ_MAIN,
            "banner",
            "https://cdn.quizbox.example/ads/newsletter-728x90.png",
            "https://quizbox.example/newsletter",
            Some("New quizzes every Friday"),
        ),
        ad(
            "Home Feed - Personality",
            "Quizbox",
            slots::HOME_FEED,
            "native",
            "https://cdn.quizbox.example/ads/dessert-feed.jpg",
            "/quiz/which-dessert-are-you",
            Some("Which dessert are you?"),
        ),
    ]
}

pub async fn run(client: &ApiClient) -> Result<(), CliError> {
    if !client.has_token() {
        return Err(CliError::Config("populate-ads needs --token or ADMIN_TOKEN".to_string()));
    }

    let ads = house_ads();
    let mut failed = 0usize;
    for ad in &ads {
        let label = format!("{} [{}]", ad.name, ad.slot);
        match client.create_ad(ad).await {
            Ok(created) => pass(&format!("{} -> id {}", label, created.id)),
            Err(e) => {
                failed += 1;
                fail(&label, &format!("{:#}", e));
            }
        }
    }

    if failed > 0 {
        return Err(anyhow::anyhow!("{} of {} ads failed to post", failed, ads.len()).into());
    }
    println!("{}", style(format!("Posted {} ads.", ads.len())).green());
    Ok(())
}
