use std::cell::{Cell, RefCell};
use std::rc::Rc;

use portfolio_pager::{Catalog, Category, Pager, PagerOptions, Project};
use portfolio_pager_adapter::{
    FilterBus, FilterEvent, LoadOutcome, MarkupView, PerfOverlay, Rating, ScrollController,
    ScrollOptions, ScrollState, Span,
};

fn catalog() -> Catalog {
    let categories = [
        (Category::Nonprofit, "Nonprofit"),
        (Category::Business, "Small Business"),
        (Category::Tech, "Technology"),
    ];
    let projects = (1..=40)
        .map(|id: u32| {
            let (category, label) = categories[id as usize % categories.len()];
            Project {
                id,
                title: format!("Project {id:02}"),
                category,
                subcategory: category.as_str().to_string(),
                display_category: label.to_string(),
                image: format!("images/projects/{id}.webp"),
                url: format!("https://example.org/{id}"),
                featured: false,
                order: id,
                detail: None,
            }
        })
        .collect();
    Catalog::new(projects).unwrap_or_default()
}

fn main() {
    // Example: a simulated page with an 800px viewport and 300px card rows.
    //
    // An adapter would:
    // - report sentinel geometry (or IntersectionObserver entries) to the controller
    // - complete the returned ticket once its (possibly async) work may proceed
    // - forward filter control changes through the bus
    // - call tick(now_ms) from a timer to clear live region announcements
    let pager = Pager::new(catalog(), PagerOptions::default());
    let controller = Rc::new(RefCell::new(ScrollController::initialize(
        pager,
        MarkupView::new(),
        ScrollOptions::default(),
        0,
    )));

    // Shared clock, so bus listeners see the same time as the scroll loop.
    let clock = Rc::new(Cell::new(0u64));

    let mut bus = FilterBus::new();
    bus.subscribe({
        let controller = Rc::clone(&controller);
        let clock = Rc::clone(&clock);
        move |event| controller.borrow_mut().on_filter_event(event, clock.get())
    });

    let mut overlay = PerfOverlay::default();
    overlay.show(0);

    let viewport_len = 800u32;
    let row_len = 300i64;
    let mut scroll = 0i64;
    loop {
        clock.set(clock.get() + 250);
        let now_ms = clock.get();
        scroll += 400;

        let mut c = controller.borrow_mut();
        c.tick(now_ms);
        if c.state() == ScrollState::EndOfContent {
            break;
        }

        let sentinel = Span::new(c.view().len() as i64 * row_len, 1);
        let viewport = Span::new(scroll, viewport_len);
        if let Some(ticket) = c.on_sentinel_geometry(viewport, sentinel, now_ms) {
            // Pretend the batch takes 120ms to arrive.
            let outcome = c.fulfill(ticket, now_ms + 120);
            if let LoadOutcome::Loaded { rendered, .. } = outcome {
                overlay.record("batch-load", 120.0, Rating::Good, now_ms);
                println!(
                    "t={now_ms} scroll={scroll} rendered={rendered} total={} live={:?}",
                    c.view().len(),
                    c.view().live_text()
                );
            }
        }
        if let Some(snapshot) = overlay.poll(now_ms, c.load_stats()) {
            println!(
                "overlay: {} metrics, avg load {:?}ms",
                snapshot.recent.len(),
                snapshot.loads.average_load_ms()
            );
        }
    }

    clock.set(clock.get() + 250);
    bus.publish(&FilterEvent::filtered("tech", ""));
    clock.set(clock.get() + 250);
    bus.publish(&FilterEvent::searched("project 1"));

    // Announcements stay up for `announce_clear_ms` after the filter change.
    controller.borrow_mut().tick(clock.get() + 500);
    println!("live={:?}", controller.borrow().view().live_text());
    controller.borrow_mut().tick(clock.get() + 1000);
    println!("live after clear={:?}", controller.borrow().view().live_text());

    let c = controller.borrow();
    println!(
        "after filter: state={:?} panel={:?} items={:?}",
        c.state(),
        c.presentation(),
        c.view().ids().collect::<Vec<_>>()
    );
    println!("announcements={:?}", c.view().announcements());
}
