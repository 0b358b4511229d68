// Example: decode a dataset document and honor its pagination metadata.
use portfolio_pager::{Catalog, Pager, card::render_card, project_id_from_query};

const DOCUMENT: &str = r#"{
  "metadata": { "initialLoad": 2, "itemsPerLoad": 1 },
  "projects": [
    {
      "id": 7,
      "title": "Harbor Food Bank",
      "category": "nonprofit",
      "subcategory": "community",
      "displayCategory": "Nonprofit",
      "image": "images/projects/harbor.webp",
      "url": "https://example.org/harbor",
      "featured": true,
      "order": 1,
      "detailData": {
        "tagline": "Getting surplus food to families across the harbor district.",
        "client": "Harbor Food Bank",
        "industry": "Nonprofit / Food Security",
        "timeline": "12 Weeks",
        "teamSize": "5 Members",
        "logo": "images/logos/harbor.webp",
        "description": "Donation scheduling and volunteer shifts in one place.",
        "challenge": "Pickups were coordinated over phone calls.",
        "solution": "A booking flow for donors and a shift board for volunteers.",
        "results": ["2x weekly pickups", "Volunteer no-shows down 40%"]
      }
    },
    {
      "id": 3,
      "title": "Main Street Bakery",
      "category": "business",
      "subcategory": "food",
      "displayCategory": "Small Business",
      "image": "images/projects/bakery.webp",
      "url": "https://example.org/bakery",
      "order": 2
    },
    {
      "id": 12,
      "title": "Clinic <Scheduler>",
      "category": "health",
      "subcategory": "clinic",
      "displayCategory": "Healthcare",
      "image": "images/projects/clinic.webp",
      "url": "https://example.org/clinic",
      "order": 3
    }
  ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let doc = Catalog::from_json(DOCUMENT)?;
    let options = doc.pager_options();
    println!("options={options:?}");

    let mut pager = Pager::new(doc.catalog, options)?;
    for project in pager.initial_batch().items.iter() {
        println!("{}", render_card(project));
    }
    println!("next={:?}", pager.next_batch().items.first().map(|p| p.id));

    if let Some(id) = project_id_from_query("?id=3&ref=gallery") {
        let neighbors = pager.catalog().neighbors(id);
        println!(
            "detail id={id} previous={:?} next={:?}",
            neighbors.and_then(|n| n.previous).map(|p| p.id),
            neighbors.and_then(|n| n.next).map(|p| p.id),
        );
    }

    for query in ["?id=7", "?id=3", "?id=42", "?ref=home"] {
        match pager.catalog().detail_for_query(query) {
            Ok((project, detail)) => {
                println!("{query}: {} ({})", project.title, detail.tagline);
                for (label, value) in detail.meta_items() {
                    println!("  {label}: {value}");
                }
            }
            Err(err) => println!("{query}: {err}"),
        }
    }

    println!("{}", serde_json::to_string_pretty(&pager.snapshot())?);
    Ok(())
}
