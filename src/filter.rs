use crate::catalog::{AppRecord, Category, Os};

/// What the listing is narrowed by. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search: String,
    pub category: Option<Category>,
    pub os: Option<Os>,
}

impl FilterCriteria {
    pub fn matches(&self, app: &AppRecord) -> bool {
        let needle = self.search.to_lowercase();
        matches_search(app, &needle)
            && self.category.is_none_or(|c| app.category == c)
            && self.os.is_none_or(|o| app.os == o)
    }

    pub fn category_label(&self) -> &'static str {
        self.category.map_or("All", |c| c.label())
    }

    pub fn os_label(&self) -> &'static str {
        self.os.map_or("All", |o| o.label())
    }

    /// All → first category → … → last category → All.
    pub fn cycle_category(&mut self) {
        self.category = cycle(&Category::ALL, self.category);
    }

    pub fn cycle_os(&mut self) {
        self.os = cycle(&Os::ALL, self.os);
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(c) => {
            let idx = all.iter().position(|x| *x == c)?;
            all.get(idx + 1).copied()
        }
    }
}

fn matches_search(app: &AppRecord, needle_lower: &str) -> bool {
    needle_lower.is_empty()
        || app.name.to_lowercase().contains(needle_lower)
        || app.description.to_lowercase().contains(needle_lower)
}

/// Parse a filter value where "All" (any case) means no restriction.
pub fn parse_scope<T: std::str::FromStr>(s: &str) -> Result<Option<T>, T::Err> {
    if s.trim().eq_ignore_ascii_case("all") {
        Ok(None)
    } else {
        s.parse().map(Some)
    }
}

/// Stable filter: the apps matching every criterion, in catalog order.
pub fn filter<'a>(apps: &'a [AppRecord], criteria: &FilterCriteria) -> Vec<&'a AppRecord> {
    let needle = criteria.search.to_lowercase();
    apps.iter()
        .filter(|app| {
            matches_search(app, &needle)
                && criteria.category.is_none_or(|c| app.category == c)
                && criteria.os.is_none_or(|o| app.os == o)
        })
        .collect()
}
