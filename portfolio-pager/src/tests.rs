use crate::*;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }
}

fn project(id: ProjectId, title: &str, category: Category, label: &str) -> Project {
    Project {
        id,
        title: String::from(title),
        category,
        subcategory: String::from(category.as_str()),
        display_category: String::from(label),
        image: format!("images/projects/{id}.png"),
        url: format!("https://example.org/{id}"),
        featured: id <= 4,
        order: id,
        detail: None,
    }
}

/// 40 projects: 13 nonprofit, 16 business, 5 education, 4 tech, 2 health, interleaved.
fn gallery_40() -> Vec<Project> {
    let mut remaining = [
        (Category::Nonprofit, "Nonprofit", 13usize),
        (Category::Business, "Business", 16),
        (Category::Education, "Education", 5),
        (Category::Tech, "Technology", 4),
        (Category::Health, "Healthcare", 2),
    ];
    let mut out = Vec::new();
    while out.len() < 40 {
        for (category, label, left) in remaining.iter_mut() {
            if *left == 0 {
                continue;
            }
            *left -= 1;
            let id = out.len() as ProjectId + 1;
            out.push(project(id, &format!("Project {id:02}"), *category, label));
        }
    }
    out
}

fn pager_40() -> Pager {
    Pager::new(Catalog::new(gallery_40()).unwrap(), PagerOptions::default()).unwrap()
}

fn ids(batch: &Batch) -> Vec<ProjectId> {
    batch.items.iter().map(|p| p.id).collect()
}

fn loaded_ids(pager: &Pager) -> Vec<ProjectId> {
    pager.loaded().map(|p| p.id).collect()
}

fn filtered_ids(pager: &Pager) -> Vec<ProjectId> {
    pager.filtered().map(|p| p.id).collect()
}

#[test]
fn forty_items_page_as_12_then_8s() {
    let mut p = pager_40();

    let first = p.initial_batch();
    assert_eq!(ids(&first), (1..=12).collect::<Vec<ProjectId>>());
    assert!(first.has_more);
    assert_eq!(first.offset, 0);

    let expected = [(13, 20), (21, 28), (29, 36), (37, 40)];
    for (i, (lo, hi)) in expected.into_iter().enumerate() {
        let batch = p.next_batch();
        assert_eq!(ids(&batch), (lo..=hi).collect::<Vec<ProjectId>>(), "batch {i}");
        assert_eq!(batch.offset, lo as usize - 1);
        assert_eq!(batch.has_more, hi != 40);
    }
    assert!(!p.has_more());
    assert_eq!(p.coverage(), Coverage::Exhausted);

    let fifth = p.next_batch();
    assert!(fifth.is_empty());
    assert!(!fifth.has_more);
    assert_eq!(fifth.offset, 40);
    assert_eq!(p.loaded_len(), 40);
}

#[test]
fn nonprofit_filter_yields_12_then_1() {
    let mut p = pager_40();
    let first = p.apply_filter(FilterContext::parse("nonprofit", ""));
    assert_eq!(p.filtered_len(), 13);
    assert_eq!(first.len(), 12);
    assert!(first.has_more);
    assert!(first.items.iter().all(|it| it.category == Category::Nonprofit));

    let next = p.next_batch();
    assert_eq!(next.len(), 1);
    assert!(!next.has_more);
    assert_eq!(next.items[0].category, Category::Nonprofit);
    assert!(p.next_batch().is_empty());
}

#[test]
fn search_without_matches_reports_no_results() {
    let mut p = pager_40();
    let first = p.apply_filter(FilterContext::parse("all", "zzz-no-match"));
    assert!(first.is_empty());
    assert!(!first.has_more);
    assert_eq!(p.filtered_len(), 0);
    assert_eq!(p.coverage(), Coverage::NoResults);
    assert!(p.next_batch().is_empty());
}

#[test]
fn search_is_case_insensitive_over_title_and_label() {
    let mut p = pager_40();
    let by_title = p.apply_filter(FilterContext::parse("all", "PROJECT 07"));
    assert_eq!(ids(&by_title), [7]);

    p.apply_filter(FilterContext::parse("all", "healthCARE"));
    assert_eq!(p.filtered_len(), 2);
    assert!(p.filtered().all(|it| it.category == Category::Health));

    p.apply_filter(FilterContext::parse("tech", "project"));
    assert_eq!(p.filtered_len(), 4);
}

#[test]
fn unknown_category_tag_matches_nothing() {
    let mut p = pager_40();
    let batch = p.apply_filter(FilterContext::parse("sports", ""));
    assert!(batch.is_empty());
    assert_eq!(
        p.filter().category(),
        &CategoryFilter::Unknown(String::from("sports"))
    );
}

#[test]
fn filter_reset_drops_stale_items_at_any_depth() {
    let mut p = pager_40();
    p.initial_batch();
    p.next_batch();
    p.next_batch();
    assert_eq!(p.loaded_len(), 28);
    let epoch = p.epoch();

    let batch = p.apply_filter(FilterContext::parse("business", ""));
    assert!(p.epoch() > epoch);
    assert_eq!(batch.epoch, p.epoch());
    assert_eq!(p.loaded_len(), 12);
    assert_eq!(loaded_ids(&p), ids(&batch));
    assert!(p.loaded().all(|it| it.category == Category::Business));
    assert!(p.has_more());
    assert_eq!(p.filtered_len(), 16);
}

#[test]
fn empty_filter_restores_full_initial_batch() {
    let mut p = pager_40();
    p.apply_filter(FilterContext::parse("health", "x"));
    p.next_batch();

    let batch = p.apply_filter(FilterContext::parse("all", ""));
    assert_eq!(ids(&batch), (1..=12).collect::<Vec<ProjectId>>());
    assert!(p.filter().is_unfiltered());
    assert_eq!(p.filtered_len(), 40);

    // Same context twice still yields the same batch under a fresh epoch.
    let again = p.apply_filter(FilterContext::all());
    assert_eq!(ids(&again), ids(&batch));
    assert_ne!(again.epoch, batch.epoch);
}

#[test]
fn initial_batch_rederives_the_same_prefix() {
    let mut p = pager_40();
    p.initial_batch();
    p.next_batch();
    let again = p.initial_batch();
    assert_eq!(ids(&again), (1..=12).collect::<Vec<ProjectId>>());
    assert_eq!(p.loaded_len(), 12);
}

#[test]
fn initial_load_larger_than_dataset() {
    let catalog = Catalog::new(gallery_40()).unwrap();
    let mut p = Pager::new(catalog, PagerOptions::new(100, 8)).unwrap();
    let batch = p.initial_batch();
    assert_eq!(batch.len(), 40);
    assert!(!batch.has_more);
    assert_eq!(p.coverage(), Coverage::Exhausted);
}

#[test]
fn randomized_prefix_invariant_and_convergence() {
    let mut rng = Lcg::new(0x5eed);
    let filters = ["all", "nonprofit", "business", "education", "tech", "health"];
    let searches = ["", "project 1", "care", "zzz"];

    for _case in 0..200 {
        let initial = rng.gen_range_usize(1, 20);
        let per = rng.gen_range_usize(1, 12);
        let catalog = Catalog::new(gallery_40()).unwrap();
        let mut p = Pager::new(catalog, PagerOptions::new(initial, per)).unwrap();
        let cat = filters[rng.gen_range_usize(0, filters.len())];
        let search = searches[rng.gen_range_usize(0, searches.len())];

        let mut delivered = ids(&p.apply_filter(FilterContext::parse(cat, search)));
        let all = filtered_ids(&p);
        assert_eq!(delivered, all[..delivered.len()]);

        let mut calls = 0usize;
        loop {
            let before = p.loaded_len();
            let batch = p.next_batch();
            calls += 1;
            if batch.is_empty() {
                // Empty exactly when everything is delivered, never before.
                assert_eq!(before, p.filtered_len());
                break;
            }
            assert_eq!(batch.offset, before);
            assert!(batch.len() <= per);
            delivered.extend(ids(&batch));
            assert_eq!(delivered, loaded_ids(&p));
            assert_eq!(delivered, all[..delivered.len()]);
            assert_eq!(batch.has_more, p.loaded_len() < p.filtered_len());
            assert!(calls <= 41);
        }
        assert_eq!(delivered, all);
    }
}

#[test]
fn statistics_report_counts_without_side_effects() {
    let mut p = pager_40();
    p.apply_filter(FilterContext::parse("nonprofit", ""));
    let s = p.statistics();
    assert_eq!(s.total, 40);
    assert_eq!(s.by_category.get(&Category::Nonprofit), Some(&13));
    assert_eq!(s.by_category.get(&Category::Business), Some(&16));
    assert_eq!(s.by_category.get(&Category::Health), Some(&2));
    assert_eq!(s.by_subcategory.get("education"), Some(&5));
    assert_eq!(s.loaded, 12);
    assert_eq!(s.filtered, 13);
    assert_eq!(p.statistics(), s);
}

#[test]
fn snapshot_tracks_filter_and_position() {
    let mut p = pager_40();
    p.apply_filter(FilterContext::parse("tech", "Pro"));
    let snap = p.snapshot();
    assert_eq!(snap.category, "tech");
    assert_eq!(snap.search, "Pro");
    assert_eq!(snap.loaded, 4);
    assert_eq!(snap.filtered, 4);
    assert!(!snap.has_more);
    assert_eq!(snap.epoch, p.epoch());
}

#[test]
fn reset_returns_to_unfiltered_with_nothing_loaded() {
    let mut p = pager_40();
    p.apply_filter(FilterContext::parse("tech", ""));
    p.reset();
    assert!(p.filter().is_unfiltered());
    assert_eq!(p.loaded_len(), 0);
    assert_eq!(p.filtered_len(), 40);
    assert_eq!(p.coverage(), Coverage::Partial);
}

#[test]
fn options_reject_zero_sizes() {
    let catalog = Catalog::new(gallery_40()).unwrap();
    let err = Pager::new(catalog.clone(), PagerOptions::new(0, 8)).unwrap_err();
    assert!(matches!(
        err,
        PagerError::InvalidOptions {
            field: "initial_load",
            ..
        }
    ));
    let err = Pager::new(catalog, PagerOptions::default().with_per_load(0)).unwrap_err();
    assert!(matches!(
        err,
        PagerError::InvalidOptions {
            field: "per_load",
            ..
        }
    ));
}

#[test]
fn options_overlay_metadata() {
    let meta = CatalogMetadata {
        initial_load: Some(6),
        items_per_load: None,
    };
    let opts = PagerOptions::default().from_metadata(&meta);
    assert_eq!(opts, PagerOptions::new(6, 8));
}

#[test]
fn catalog_rejects_zero_and_duplicate_ids() {
    let mut projects = gallery_40();
    projects[3].id = 0;
    assert!(matches!(
        Catalog::new(projects).unwrap_err(),
        PagerError::InvalidProjectId { index: 3 }
    ));

    let mut projects = gallery_40();
    projects[5].id = 2;
    assert!(matches!(
        Catalog::new(projects).unwrap_err(),
        PagerError::DuplicateProjectId { id: 2 }
    ));
}

#[test]
fn catalog_orders_by_explicit_order() {
    let mut projects = gallery_40();
    projects.reverse();
    let catalog = Catalog::new(projects).unwrap();
    let ids: Vec<_> = catalog.projects().iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..=40).collect::<Vec<ProjectId>>());
}

#[test]
fn catalog_lookups() {
    let catalog = Catalog::new(gallery_40()).unwrap();
    assert_eq!(catalog.get(7).map(|p| p.id), Some(7));
    assert!(catalog.get(99).is_none());
    assert_eq!(catalog.featured().count(), 4);
    assert_eq!(
        catalog.by_category(&CategoryFilter::Only(Category::Tech)).count(),
        4
    );
    assert_eq!(catalog.by_category(&CategoryFilter::All).count(), 40);

    let n = catalog.neighbors(1).unwrap();
    assert!(n.previous.is_none());
    assert_eq!(n.next.map(|p| p.id), Some(2));
    let n = catalog.neighbors(40).unwrap();
    assert_eq!(n.previous.map(|p| p.id), Some(39));
    assert!(n.next.is_none());
    assert!(catalog.neighbors(0).is_none());
}

#[test]
fn query_string_project_ids() {
    assert_eq!(project_id_from_query("?id=7"), Some(7));
    assert_eq!(project_id_from_query("ref=home&id=12"), Some(12));
    assert_eq!(project_id_from_query("?id=0"), None);
    assert_eq!(project_id_from_query("?id=abc"), None);
    assert_eq!(project_id_from_query("?ids=3"), None);
    assert_eq!(project_id_from_query(""), None);
}

fn case_study() -> ProjectDetail {
    ProjectDetail {
        tagline: String::from("Digital outreach for local volunteers."),
        client: String::from("Help Foundation"),
        industry: String::from("Nonprofit / Community Service"),
        timeline: String::from("16 Weeks"),
        team_size: String::from("8 Members"),
        logo: String::from("images/logos/help.png"),
        description: String::from("A volunteer coordination platform."),
        challenge: String::from("Coordinating volunteers by phone."),
        solution: String::from("Volunteer management and donations online."),
        results: alloc::vec![String::from("300% more registrations")],
    }
}

#[test]
fn detail_lookup_reports_each_failure() {
    let mut projects = gallery_40();
    projects[2].detail = Some(case_study());
    let catalog = Catalog::new(projects).unwrap();

    let (project, detail) = catalog.detail_for_query("?id=3&ref=grid").unwrap();
    assert_eq!(project.id, 3);
    assert_eq!(detail.client, "Help Foundation");
    assert_eq!(
        detail.meta_items(),
        [
            ("Client", "Help Foundation"),
            ("Industry", "Nonprofit / Community Service"),
            ("Timeline", "16 Weeks"),
            ("Team Size", "8 Members"),
        ]
    );

    assert!(matches!(
        catalog.detail_for_query("?ref=grid"),
        Err(PagerError::MissingProjectId)
    ));
    assert!(matches!(
        catalog.detail_for_query("?id=nope"),
        Err(PagerError::MissingProjectId)
    ));
    assert!(matches!(
        catalog.detail_for_query("?id=99"),
        Err(PagerError::ProjectNotFound { id: 99 })
    ));
    assert!(matches!(
        catalog.detail(4),
        Err(PagerError::MissingDetail { id: 4 })
    ));
}

#[test]
fn category_parsing() {
    assert_eq!("tech".parse::<Category>().unwrap(), Category::Tech);
    assert!(matches!(
        "Tech".parse::<Category>(),
        Err(PagerError::UnknownCategory { .. })
    ));
    assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
    assert_eq!(
        CategoryFilter::parse("health"),
        CategoryFilter::Only(Category::Health)
    );
}

#[test]
fn card_markup_escapes_and_carries_identity() {
    let mut p = project(9, "Tom & Jerry's <Studio>", Category::Business, "Creative Agency");
    p.url = String::from("https://example.org/?a=1&b=\"2\"");
    let html = card::render_card(&p);
    assert!(html.starts_with("<div class=\"project-card\" data-category=\"business\" data-id=\"9\">"));
    assert!(html.contains("<h3>Tom &amp; Jerry&#39;s &lt;Studio&gt;</h3>"));
    assert!(html.contains("href=\"https://example.org/?a=1&amp;b=&quot;2&quot;\""));
    assert!(html.contains("<span class=\"project-category\">Creative Agency</span>"));
    assert!(!html.contains("<Studio>"));
}

#[test]
fn skeleton_cards_repeat() {
    let html = card::render_skeleton_cards(3);
    assert_eq!(html.matches("skeleton-card").count(), 3);
    assert!(card::render_skeleton_cards(0).is_empty());
}

#[cfg(feature = "json")]
#[test]
fn json_document_loads_catalog_and_metadata() {
    let doc = r#"{
        "metadata": { "totalProjects": 2, "itemsPerLoad": 1, "initialLoad": 1 },
        "projects": [
            { "id": 2, "title": "L-Time Properties", "category": "business",
              "subcategory": "real_estate", "displayCategory": "Real Estate",
              "image": "images/ltimeproperties.png", "url": "https://example.com",
              "featured": true, "order": 2 },
            { "id": 1, "title": "Help Foundation", "category": "nonprofit",
              "subcategory": "nonprofit", "displayCategory": "Nonprofit",
              "image": "images/help.png", "url": "https://example.org",
              "featured": true, "order": 1 }
        ]
    }"#;
    let doc = Catalog::from_json(doc).unwrap();
    assert_eq!(doc.catalog.len(), 2);
    assert_eq!(doc.catalog.projects()[0].id, 1);
    assert_eq!(doc.catalog.get(2).unwrap().display_category, "Real Estate");
    assert_eq!(doc.pager_options(), PagerOptions::new(1, 1));

    let mut p = Pager::new(doc.catalog.clone(), doc.pager_options()).unwrap();
    assert_eq!(p.initial_batch().len(), 1);
    assert_eq!(p.next_batch().len(), 1);
    assert!(p.next_batch().is_empty());
}

#[cfg(feature = "json")]
#[test]
fn json_document_errors_are_reported() {
    assert!(matches!(
        Catalog::from_json("{ \"projects\": [ { \"id\": 1 } ] }"),
        Err(PagerError::Json(_))
    ));
    let bad_category = r#"{ "projects": [ { "id": 1, "title": "x", "category": "sports",
        "subcategory": "x", "displayCategory": "x", "image": "x", "url": "x" } ] }"#;
    assert!(Catalog::from_json(bad_category).is_err());
}

#[cfg(feature = "json")]
#[test]
fn json_detail_data_survives_a_round_trip() {
    let doc = r#"{ "projects": [
        { "id": 1, "title": "Help Foundation", "category": "nonprofit",
          "subcategory": "nonprofit", "displayCategory": "Nonprofit",
          "image": "images/help.png", "url": "https://example.org", "order": 1,
          "detailData": {
              "tagline": "Digital outreach for local volunteers.",
              "client": "Help Foundation",
              "industry": "Nonprofit / Community Service",
              "timeline": "16 Weeks",
              "teamSize": "8 Members",
              "logo": "images/logos/help.png",
              "description": "A volunteer coordination platform.",
              "challenge": "Coordinating volunteers by phone.",
              "solution": "Volunteer management and donations online.",
              "results": ["300% more registrations"]
          } },
        { "id": 2, "title": "Bakery", "category": "business",
          "subcategory": "food", "displayCategory": "Small Business",
          "image": "images/bakery.png", "url": "https://example.com", "order": 2 }
    ] }"#;
    let doc = Catalog::from_json(doc).unwrap();
    let (_, detail) = doc.catalog.detail(1).unwrap();
    assert_eq!(detail, &case_study());
    assert!(matches!(
        doc.catalog.detail(2),
        Err(PagerError::MissingDetail { id: 2 })
    ));

    let with_detail = doc.catalog.get(1).unwrap();
    let json = serde_json::to_string(with_detail).unwrap();
    assert!(json.contains("\"detailData\""));
    assert!(json.contains("\"teamSize\":\"8 Members\""));
    let back: Project = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, with_detail);

    let plain = serde_json::to_string(doc.catalog.get(2).unwrap()).unwrap();
    assert!(!plain.contains("detailData"));
}

#[cfg(feature = "json")]
#[test]
fn filter_context_serializes_only_category_and_search() {
    let filter = FilterContext::parse("tech", "Project 0");
    let json = serde_json::to_string(&filter).unwrap();
    assert!(!json.contains("needle"));
    let back: FilterContext = serde_json::from_str(&json).unwrap();
    assert_eq!(back, filter);

    let decoded: FilterContext =
        serde_json::from_str(r#"{ "category": "All", "search": "PROJECT 09" }"#).unwrap();
    let mut p = project(9, "Project 09", Category::Tech, "Technology");
    assert!(decoded.matches(&p));
    p.title = String::from("Project 10");
    assert!(!decoded.matches(&p));

    // A stray matcher field cannot override the search term.
    let decoded: FilterContext = serde_json::from_str(
        r#"{ "category": "All", "search": "alpha", "needle": "project" }"#,
    )
    .unwrap();
    assert_eq!(decoded.search(), "alpha");
    assert!(!decoded.matches(&p));
}
