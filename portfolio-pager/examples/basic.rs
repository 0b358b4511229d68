// Example: page through a catalog, then narrow it with a filter.
use portfolio_pager::{Catalog, Category, FilterContext, Pager, PagerOptions, Project};

fn project(id: u32, category: Category, label: &str) -> Project {
    Project {
        id,
        title: format!("Site {id}"),
        category,
        subcategory: category.as_str().to_string(),
        display_category: label.to_string(),
        image: format!("images/projects/{id}.webp"),
        url: format!("https://example.org/site-{id}"),
        featured: id == 1,
        order: id,
        detail: None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let projects = (1..=30)
        .map(|id| match id % 3 {
            0 => project(id, Category::Nonprofit, "Nonprofit"),
            1 => project(id, Category::Business, "Small Business"),
            _ => project(id, Category::Education, "Education"),
        })
        .collect();

    let mut pager = Pager::new(Catalog::new(projects)?, PagerOptions::new(12, 8))?;

    let first = pager.initial_batch();
    println!("initial: {} items, has_more={}", first.len(), first.has_more);
    loop {
        let batch = pager.next_batch();
        if batch.is_empty() {
            break;
        }
        println!(
            "batch @{}: {} items, has_more={}",
            batch.offset,
            batch.len(),
            batch.has_more
        );
    }
    println!("coverage={:?}", pager.coverage());

    let batch = pager.apply_filter(FilterContext::parse("nonprofit", "site 1"));
    let titles: Vec<&str> = batch.items.iter().map(|p| p.title.as_str()).collect();
    println!("epoch={} nonprofit matching 'site 1': {titles:?}", batch.epoch.0);

    let stats = pager.statistics();
    println!("by_category={:?}", stats.by_category);
    Ok(())
}
