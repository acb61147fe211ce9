use anyhow::Result;
use console::style;

use softstore::catalog::Catalog;
use softstore::filter;

use super::ListArgs;

pub fn run(catalog: &Catalog, args: &ListArgs) -> Result<()> {
    let criteria = args.criteria()?;
    let apps = filter::filter(catalog.apps(), &criteria);

    if criteria.search.is_empty() {
        println!("{}", style("Discover the best apps").bold());
    } else {
        println!("{}", style(format!("Search results for \"{}\"", criteria.search)).bold());
    }
    println!(
        "{}",
        style(format!(
            "Platform: {}  Category: {}  ({} of {})",
            criteria.os_label(),
            criteria.category_label(),
            apps.len(),
            catalog.len()
        ))
        .dim()
    );
    println!();

    if apps.is_empty() {
        println!("No apps found.");
        println!("Try adjusting your search or filters.");
        return Ok(());
    }

    for app in apps {
        println!(
            "[{:>3}] {} {} {} {} {} {}",
            app.id,
            style(format!("{:<22}", app.name)).bold(),
            style(format!("{:<24}", app.developer)).dim(),
            style(format!("{:<13}", app.category)).magenta(),
            style(format!("{:<8}", app.os)).cyan(),
            style(format!("{:<11}", app.license)).green(),
            style(format!("{} {}/10", super::stars(app), app.rating)).yellow(),
        );
    }

    Ok(())
}

pub fn categories(catalog: &Catalog) -> Result<()> {
    for label in catalog.category_labels() {
        let count = catalog
            .apps()
            .iter()
            .filter(|a| label == "All" || a.category.label() == label)
            .count();
        println!("{label:<14} {}", style(format!("{count} apps")).dim());
    }
    Ok(())
}
