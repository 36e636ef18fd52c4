//! Replays a scripted session against an in-memory article list: a pull
//! that triggers a refresh, then a fling in each direction over a row.
//!
//! Run with `RUST_LOG=debug` to see every state transition.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Context;
use feedex_core::{DefaultScheduler, Runtime, UiDispatcher};
use feedex_ui::{
    ContentElement, IndicatorFrame, ItemToggleConfig, ItemToggleDispatcher, MotionSample,
    PullRefreshConfig, PullRefreshController, Rect, RowId, RowLayout, ToggleHandler,
};

const WIDTH: f32 = 480.0;
const HEIGHT: f32 = 800.0;
const ROW_HEIGHT: f32 = 72.0;
const FRAME_MS: u64 = 16;

#[derive(Debug)]
struct Article {
    id: RowId,
    title: String,
    read: bool,
    favorite: bool,
}

/// The scrollable list hosted by the refresh surface.
struct ArticleList {
    articles: RefCell<Vec<Article>>,
    top: Cell<f32>,
    dispatcher: UiDispatcher,
    saves: RefCell<Vec<JoinHandle<()>>>,
}

impl ArticleList {
    fn new(dispatcher: UiDispatcher) -> Self {
        let articles = (0..8)
            .map(|index| Article {
                id: 1_000 + index,
                title: format!("Article #{index}"),
                read: false,
                favorite: false,
            })
            .collect();
        Self {
            articles: RefCell::new(articles),
            top: Cell::new(0.0),
            dispatcher,
            saves: RefCell::new(Vec::new()),
        }
    }

    fn update(&self, row: RowId, change: impl FnOnce(&mut Article)) {
        let mut articles = self.articles.borrow_mut();
        let Some(article) = articles.iter_mut().find(|article| article.id == row) else {
            log::warn!("toggle for unknown row {row}");
            return;
        };
        change(article);
        log::info!(
            "{}: read={} favorite={}",
            article.title,
            article.read,
            article.favorite
        );

        // Persisting happens off the UI thread; the result comes back
        // through the dispatcher on a later tick.
        let dispatcher = self.dispatcher.clone();
        let save = thread::spawn(move || {
            thread::sleep(Duration::from_millis(5));
            dispatcher.post(move || log::info!("row {row} saved"));
        });
        self.saves.borrow_mut().push(save);
    }

    fn join_saves(&self) -> anyhow::Result<()> {
        for save in self.saves.borrow_mut().drain(..) {
            save.join()
                .map_err(|_| anyhow::anyhow!("save worker panicked"))?;
        }
        Ok(())
    }
}

struct ListContent(Rc<ArticleList>);

impl ContentElement for ListContent {
    fn can_scroll_up(&self) -> bool {
        false
    }

    fn top(&self) -> f32 {
        self.0.top.get()
    }

    fn offset_top_and_bottom(&mut self, dy: f32) {
        self.0.top.set(self.0.top.get() + dy);
    }

    fn measure(&mut self, _width: f32, _height: f32) {}

    fn layout(&mut self, bounds: Rect) {
        self.0.top.set(bounds.y);
    }
}

impl RowLayout for ArticleList {
    fn row_at(&self, point: feedex_ui::Point) -> Option<RowId> {
        if point.x < 0.0 || point.x >= WIDTH {
            return None;
        }
        let index = ((point.y - self.top.get()) / ROW_HEIGHT).floor();
        if index < 0.0 {
            return None;
        }
        self.articles
            .borrow()
            .get(index as usize)
            .map(|article| article.id)
    }

    fn row_bounds(&self, row: RowId) -> Option<Rect> {
        let articles = self.articles.borrow();
        let index = articles.iter().position(|article| article.id == row)?;
        Some(Rect::new(
            0.0,
            self.top.get() + index as f32 * ROW_HEIGHT,
            WIDTH,
            ROW_HEIGHT,
        ))
    }
}

impl ToggleHandler for ArticleList {
    fn toggle_read(&self, row: RowId) {
        self.update(row, |article| article.read = !article.read);
    }

    fn toggle_favorite(&self, row: RowId) {
        self.update(row, |article| article.favorite = !article.favorite);
    }
}

/// Feeds `samples` in order, ticking the runtime frame by frame up to each
/// sample's timestamp first.
fn replay(
    runtime: &Runtime,
    samples: &[MotionSample],
    mut deliver: impl FnMut(&MotionSample) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    for sample in samples {
        while runtime.now_millis() + FRAME_MS <= sample.time_ms {
            runtime.advance_by(FRAME_MS);
        }
        if runtime.now_millis() < sample.time_ms {
            runtime.tick(sample.time_ms);
        }
        deliver(sample)?;
    }
    Ok(())
}

fn describe(frame: &IndicatorFrame) -> String {
    match frame {
        IndicatorFrame::Hidden => "hidden".to_string(),
        IndicatorFrame::Trigger { bar, .. } => format!("trigger bar {:.0}px", bar.width),
        IndicatorFrame::Sweep { bands, clear, .. } => match clear {
            Some(clear) => format!("finishing, {:.0}px cleared", clear.width),
            None => format!("sweeping with {} bands", bands.len()),
        },
    }
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let handle = runtime.handle();
    let list = Rc::new(ArticleList::new(handle.dispatcher()));

    let controller = PullRefreshController::new(handle.clone(), PullRefreshConfig::default());
    controller
        .add_child(Rc::new(RefCell::new(ListContent(Rc::clone(&list)))))
        .context("hosting the article list")?;
    controller.measure(WIDTH, HEIGHT)?;
    controller.layout()?;

    let refresh_requested = Rc::new(Cell::new(false));
    let requested = Rc::clone(&refresh_requested);
    controller.set_on_refresh_listener(move || {
        log::info!("refresh requested");
        requested.set(true);
    });

    let rows = ItemToggleDispatcher::new(
        handle.clone(),
        list.clone(),
        list.clone(),
        ItemToggleConfig::default(),
    );
    rows.set_cancel_sink(|sample| log::debug!("row highlight cleared at {}ms", sample.time_ms));

    log::info!("=== pull to refresh ===");
    let mut pull = vec![MotionSample::down(240.0, 40.0, 0)];
    pull.extend((1..=12).map(|step| {
        MotionSample::move_to(240.0, 40.0 + step as f32 * 14.0, step * FRAME_MS)
    }));
    pull.push(MotionSample::up(240.0, 208.0, 13 * FRAME_MS));
    replay(&runtime, &pull, |sample| {
        controller.on_intercept_touch_event(sample)?;
        log::debug!(
            "offset {:.0}px, indicator {}",
            controller.current_offset_top(),
            describe(&controller.draw(runtime.now_millis()))
        );
        Ok(())
    })?;

    let _refresh_done = refresh_requested.get().then(|| {
        let controller = controller.clone();
        handle.post_delayed(1_200, move || {
            log::info!("feeds refreshed");
            controller.set_refreshing(false);
        })
    });
    let mut last = String::new();
    while controller.is_refreshing() || controller.is_animating() {
        runtime.advance_by(FRAME_MS);
        let frame = describe(&controller.draw(runtime.now_millis()));
        if frame != last {
            log::info!("{}ms: indicator {frame}", runtime.now_millis());
            last = frame;
        }
    }
    runtime.advance_by(1_000);
    log::info!(
        "indicator {}",
        describe(&controller.draw(runtime.now_millis()))
    );

    log::info!("=== fling rows ===");
    for (from, to) in [(400.0, 100.0), (100.0, 400.0)] {
        let start = runtime.now_millis();
        let mut fling = vec![MotionSample::down(from, 100.0, start)];
        fling.extend((1..=10).map(|step| {
            let x = from + (to - from) * step as f32 / 10.0;
            MotionSample::move_to(x, 104.0, start + step * 8)
        }));
        fling.push(MotionSample::up(to, 104.0, start + 80));
        replay(&runtime, &fling, |sample| {
            rows.on_touch_event(sample);
            Ok(())
        })?;
        runtime.advance_by(FRAME_MS);
    }

    list.join_saves()?;
    while runtime.has_pending_work() {
        runtime.advance_by(FRAME_MS);
    }
    for article in list.articles.borrow().iter().take(3) {
        log::info!("{article:?}");
    }
    Ok(())
}
