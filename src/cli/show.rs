use anyhow::Result;
use console::style;

use softstore::catalog::{AppRecord, Catalog};
use softstore::config::Config;
use softstore::review::{ReviewClient, ReviewRecord};

pub async fn run(cfg: &Config, catalog: &Catalog, key: &str, no_review: bool) -> Result<()> {
    let app = super::find_app(catalog, key)?;

    println!("Home / {} / {}", app.category, style(&app.name).bold());
    println!();
    println!("{}", style(&app.name).bold().underlined());
    println!("by {}", app.developer);
    println!(
        "{}  {}/10  ·  {} downloads",
        style(super::stars(app)).yellow(),
        app.rating,
        app.downloads
    );
    println!();
    print_specs(app);
    println!();
    println!("{}", style("About").bold());
    println!("{}", app.description);
    println!("{}", super::about_text(app));

    if no_review {
        return Ok(());
    }

    println!();
    let review = fetch(cfg, app).await?;
    print_review(&review);
    Ok(())
}

pub async fn review(cfg: &Config, catalog: &Catalog, key: &str, json: bool) -> Result<()> {
    let app = super::find_app(catalog, key)?;
    let review = fetch(cfg, app).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&review)?);
    } else {
        print_review(&review);
    }
    Ok(())
}

async fn fetch(cfg: &Config, app: &AppRecord) -> Result<ReviewRecord> {
    let client = ReviewClient::from_config(cfg)?;
    if !client.is_configured() {
        tracing::info!("No API key set; run `softstore login` for live reviews");
    }
    Ok(client.fetch(&app.name, app.os.label()).await)
}

fn print_specs(app: &AppRecord) {
    let rows = [
        ("Version", app.version.as_str()),
        ("License", app.license.label()),
        ("Platform", app.os.label()),
        ("Developer", app.developer.as_str()),
        ("Category", app.category.label()),
        ("Language", "English"),
    ];
    for (label, value) in rows {
        println!("  {:<10} {}", style(label).dim(), value);
    }
}

pub fn print_review(review: &ReviewRecord) {
    println!("{}", style("✦ AI Review").magenta().bold());
    println!("{}", review.summary);
    println!();

    println!("{}", style("Pros").green().bold());
    for pro in review.pros.iter().take(4) {
        println!("  + {pro}");
    }
    println!("{}", style("Cons").red().bold());
    for con in review.cons.iter().take(4) {
        println!("  - {con}");
    }
    println!();

    println!("{}", style("Technical opinion").bold());
    println!("{}", review.technical_opinion);
    println!();

    let score = format!("{}/100", review.safety_score);
    let score = match review.safety_score {
        80..=100 => style(score).green(),
        50..=79 => style(score).yellow(),
        _ => style(score).red(),
    };
    println!("Safety score:  {score}");

    if !review.alternative_apps.is_empty() {
        let alts: Vec<&str> = review
            .alternative_apps
            .iter()
            .take(5)
            .map(String::as_str)
            .collect();
        println!("Alternatives:  {}", alts.join(", "));
    }
}
