//! Pull-to-refresh surface.
//!
//! Hosts a single scrollable [`ContentElement`] and turns downward drags at
//! the top of it into refresh requests. The drag displaces the content and
//! grows a trigger bar; releasing early, or pausing longer than the return
//! timeout, animates both back to rest.

use std::cell::RefCell;
use std::rc::Rc;

use feedex_animation::{AnimationSlot, AnimationTask, OffsetAnimator};
use feedex_core::{RuntimeHandle, TimerSlot};
use feedex_foundation::{FlingThresholds, GestureClassifier, GestureSignal, MotionPhase, MotionSample};
use feedex_ui_graphics::{Color, EdgeInsets, Rect, Size};

use super::config::PullRefreshConfig;
use super::state::PullState;
use crate::error::LayoutError;
use crate::host::SharedContent;
use crate::progress_indicator::{ColorScheme, IndicatorFrame, ProgressIndicator};

type RefreshListener = Rc<dyn Fn()>;
type ScrollProbe = Rc<dyn Fn() -> bool>;

#[derive(Default)]
struct Outcome {
    handled: bool,
    refresh: bool,
}

struct ControllerInner {
    runtime: RuntimeHandle,
    config: PullRefreshConfig,
    touch_slop: f32,
    classifier: GestureClassifier,
    animator: OffsetAnimator,
    indicator: ProgressIndicator,
    children: Vec<SharedContent>,
    target: Option<SharedContent>,
    padding: EdgeInsets,
    measured: Size,
    original_offset_top: f32,
    current_offset_top: f32,
    current_percentage: f32,
    trigger_distance: Option<f32>,
    state: PullState,
    // Set when a refresh or cancel sends the content home; cleared by the
    // next down.
    returning_to_start: bool,
    refreshing: bool,
    enabled: bool,
    attached: bool,
    prev_y: f32,
    auto_cancel: TimerSlot,
    returns_in_flight: u8,
    on_refresh: Option<RefreshListener>,
    can_child_scroll_up: Option<ScrollProbe>,
}

/// Pull-to-refresh controller. Cloning yields another handle to the same
/// surface.
#[derive(Clone)]
pub struct PullRefreshController {
    inner: Rc<RefCell<ControllerInner>>,
}

impl PullRefreshController {
    pub fn new(runtime: RuntimeHandle, config: PullRefreshConfig) -> Self {
        let touch_slop = config.scaled_touch_slop();
        let inner = ControllerInner {
            animator: OffsetAnimator::new(runtime.clone()),
            runtime,
            config,
            touch_slop,
            classifier: GestureClassifier::new(touch_slop, FlingThresholds::default()),
            indicator: ProgressIndicator::new(),
            children: Vec::new(),
            target: None,
            padding: EdgeInsets::default(),
            measured: Size::ZERO,
            original_offset_top: 0.0,
            current_offset_top: 0.0,
            current_percentage: 0.0,
            trigger_distance: None,
            state: PullState::Idle,
            returning_to_start: false,
            refreshing: false,
            enabled: true,
            attached: true,
            prev_y: 0.0,
            auto_cancel: TimerSlot::new(),
            returns_in_flight: 0,
            on_refresh: None,
            can_child_scroll_up: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Adds the managed child. A second child is a configuration error,
    /// reported immediately.
    pub fn add_child(&self, child: SharedContent) -> Result<(), LayoutError> {
        let mut inner = self.inner.borrow_mut();
        inner.children.push(child);
        match inner.children.len() {
            1 => Ok(()),
            count => Err(LayoutError::MultipleChildren { count }),
        }
    }

    pub fn set_on_refresh_listener(&self, listener: impl Fn() + 'static) {
        self.inner.borrow_mut().on_refresh = Some(Rc::new(listener));
    }

    /// Replaces the content's own scroll query, for content with custom
    /// scrolling semantics.
    pub fn set_can_child_scroll_up(&self, probe: impl Fn() -> bool + 'static) {
        self.inner.borrow_mut().can_child_scroll_up = Some(Rc::new(probe));
    }

    pub fn can_child_scroll_up(&self) -> bool {
        let (probe, target) = {
            let inner = self.inner.borrow();
            (
                inner.can_child_scroll_up.clone(),
                inner.target.clone().or_else(|| inner.children.first().cloned()),
            )
        };
        match (probe, target) {
            (Some(probe), _) => probe(),
            (None, Some(target)) => target.borrow().can_scroll_up(),
            (None, None) => false,
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.inner.borrow().refreshing
    }

    /// Forces the refreshing state from outside the gesture path. Repeating
    /// the current value is a no-op.
    pub fn set_refreshing(&self, refreshing: bool) {
        let mut inner = self.inner.borrow_mut();
        inner.set_refreshing(&self.inner, refreshing, "external");
    }

    pub fn set_color_scheme(
        &self,
        c1: Color,
        c2: Color,
        c3: Color,
        c4: Color,
    ) -> Result<(), LayoutError> {
        let mut inner = self.inner.borrow_mut();
        if inner.ensure_target()?.is_none() {
            return Err(LayoutError::NoContent);
        }
        inner
            .indicator
            .set_color_scheme(ColorScheme::new(c1, c2, c3, c4));
        inner.runtime.schedule();
        Ok(())
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.inner.borrow_mut().enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.borrow().enabled
    }

    pub fn set_padding(&self, padding: EdgeInsets) {
        let mut inner = self.inner.borrow_mut();
        inner.padding = padding;
        inner.original_offset_top = padding.top;
    }

    pub fn state(&self) -> PullState {
        self.inner.borrow().state
    }

    /// Content displacement from its resting top, in pixels.
    pub fn current_offset_top(&self) -> f32 {
        self.inner.borrow().current_offset_top
    }

    /// Pull progress in [0, 1].
    pub fn trigger_percentage(&self) -> f32 {
        self.inner.borrow().current_percentage
    }

    /// Percentage the indicator currently shows; differs from
    /// [`trigger_percentage`](Self::trigger_percentage) while shrinking.
    pub fn indicator_percentage(&self) -> f32 {
        self.inner.borrow().indicator.trigger_percentage()
    }

    pub fn trigger_distance(&self) -> Option<f32> {
        self.inner.borrow().trigger_distance
    }

    pub fn original_offset_top(&self) -> f32 {
        self.inner.borrow().original_offset_top
    }

    pub fn is_auto_cancel_pending(&self) -> bool {
        self.inner.borrow().auto_cancel.is_pending()
    }

    pub fn is_animating(&self) -> bool {
        !self.inner.borrow().animator.is_idle()
    }

    /// Sizes the managed child to the surface minus padding.
    pub fn measure(&self, width: f32, height: f32) -> Result<(), LayoutError> {
        let mut inner = self.inner.borrow_mut();
        if inner.children.len() > 1 {
            return Err(LayoutError::MultipleChildren {
                count: inner.children.len(),
            });
        }
        inner.measured = Size::new(width, height);
        let padding = inner.padding;
        if let Some(child) = inner.children.first() {
            child.borrow_mut().measure(
                width - padding.horizontal_sum(),
                height - padding.vertical_sum(),
            );
        }
        inner.ensure_target()?;
        Ok(())
    }

    /// Places the indicator along the top edge and the child below the
    /// padding, displaced by the current pull offset.
    pub fn layout(&self) -> Result<(), LayoutError> {
        let mut inner = self.inner.borrow_mut();
        let Size { width, height } = inner.measured;
        let bar_height = inner.config.progress_bar_height();
        inner.indicator.set_bounds(Rect::new(0.0, 0.0, width, bar_height));
        let Some(child) = inner.ensure_target()? else {
            return Ok(());
        };
        let padding = inner.padding;
        child.borrow_mut().layout(Rect::new(
            padding.left,
            inner.current_offset_top + padding.top,
            width - padding.horizontal_sum(),
            height - padding.vertical_sum(),
        ));
        Ok(())
    }

    /// Decides whether this surface takes over the touch sequence.
    pub fn on_intercept_touch_event(&self, sample: &MotionSample) -> Result<bool, LayoutError> {
        let child_scrolls = self.can_child_scroll_up();
        let eligible = {
            let mut inner = self.inner.borrow_mut();
            inner.ensure_target()?;
            if inner.returning_to_start && sample.phase == MotionPhase::Down {
                inner.returning_to_start = false;
            }
            inner.enabled && !inner.returning_to_start && !child_scrolls
        };
        // Terminal samples always reach the classifier so a session never
        // outlives its touch sequence.
        if !eligible && !sample.is_terminal() {
            return Ok(false);
        }
        Ok(self.on_touch_event(sample))
    }

    /// Children of this surface may not veto interception.
    pub fn request_disallow_intercept_touch_event(&self, _disallow: bool) {}

    /// Feeds one sample of a sequence this surface owns. A `Down` only
    /// starts a pull on an enabled surface whose content is scrolled to
    /// the top.
    pub fn on_touch_event(&self, sample: &MotionSample) -> bool {
        let child_scrolls = sample.phase == MotionPhase::Down && self.can_child_scroll_up();
        let outcome = {
            let mut inner = self.inner.borrow_mut();
            inner.handle_sample(&self.inner, sample, child_scrolls)
        };
        if outcome.refresh {
            let listener = self.inner.borrow().on_refresh.clone();
            match listener {
                Some(listener) => listener(),
                None => log::debug!("refresh triggered with no listener"),
            }
        }
        outcome.handled
    }

    pub fn on_attached(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.auto_cancel.cancel();
        if !inner.attached {
            inner.attached = true;
            inner.reset_gesture("attached");
        }
    }

    /// Tears the surface down: no timer, animation completion or listener
    /// of the interrupted gesture runs afterwards.
    pub fn on_detached(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.auto_cancel.cancel();
        inner.attached = false;
        inner.reset_gesture("detached");
    }

    /// What to paint for the indicator at `now_ms`. Requests another frame
    /// while the indicator animates.
    pub fn draw(&self, now_ms: u64) -> IndicatorFrame {
        let mut inner = self.inner.borrow_mut();
        let frame = inner.indicator.frame(now_ms);
        if inner.indicator.is_animating(now_ms) {
            inner.runtime.schedule();
        }
        frame
    }
}

impl ControllerInner {
    fn transition(&mut self, to: PullState, cause: &str) {
        if self.state != to {
            log::debug!("pull state {} -> {} ({cause})", self.state, to);
            self.state = to;
        }
    }

    fn ensure_target(&mut self) -> Result<Option<SharedContent>, LayoutError> {
        if self.target.is_none() {
            if self.children.len() > 1 {
                return Err(LayoutError::MultipleChildren {
                    count: self.children.len(),
                });
            }
            self.target = self.children.first().cloned();
            if self.target.is_some() {
                self.original_offset_top = self.padding.top;
            }
        }
        if self.trigger_distance.is_none() && self.measured.height > 0.0 {
            let distance = self.config.trigger_distance(self.measured.height);
            log::debug!("trigger distance resolved to {distance}px");
            self.trigger_distance = Some(distance);
            self.classifier.set_trigger_distance(Some(distance));
        }
        Ok(self.target.clone())
    }

    fn effective_trigger_distance(&self) -> f32 {
        self.trigger_distance
            .unwrap_or_else(|| self.config.base_trigger_distance())
    }

    fn handle_sample(
        &mut self,
        this: &Rc<RefCell<Self>>,
        sample: &MotionSample,
        child_scrolls: bool,
    ) -> Outcome {
        if !self.attached {
            return Outcome::default();
        }
        match sample.phase {
            MotionPhase::Down => {
                if !self.enabled || child_scrolls {
                    log::trace!(
                        "down ignored (enabled={}, content scrolls up={child_scrolls})",
                        self.enabled
                    );
                    return Outcome::default();
                }
                if !self.state.accepts_pull() {
                    log::trace!("down ignored in state {}", self.state);
                    return Outcome::default();
                }
                // A timer left by the previous release must not end this press.
                self.auto_cancel.cancel();
                self.animator.cancel_all();
                self.returns_in_flight = 0;
                self.returning_to_start = false;
                self.current_percentage = 0.0;
                self.prev_y = sample.y();
                self.classifier.classify(sample);
                self.transition(PullState::Tracking, "down");
                Outcome::default()
            }
            MotionPhase::Move => {
                if self.returning_to_start || self.state != PullState::Tracking {
                    return Outcome::default();
                }
                match self.classifier.classify(sample) {
                    GestureSignal::PullTrigger => self.start_refresh(this),
                    GestureSignal::PullProgress(distance)
                        if distance > self.effective_trigger_distance() =>
                    {
                        self.start_refresh(this)
                    }
                    GestureSignal::PullProgress(distance) => {
                        self.track(this, distance, sample.y());
                        Outcome {
                            handled: true,
                            refresh: false,
                        }
                    }
                    _ => Outcome::default(),
                }
            }
            MotionPhase::Up | MotionPhase::Cancel => {
                self.classifier.classify(sample);
                if self.state == PullState::Tracking && !self.auto_cancel.is_pending() {
                    if self.current_offset_top > 0.0 || self.current_percentage > 0.0 {
                        self.cancel_pull(this, "released");
                    } else {
                        self.transition(PullState::Idle, "released");
                    }
                }
                Outcome::default()
            }
        }
    }

    fn track(&mut self, this: &Rc<RefCell<Self>>, distance: f32, y: f32) {
        let trigger = self.effective_trigger_distance();
        let percentage = self
            .config
            .progress_easing()
            .transform(distance / trigger)
            .clamp(0.0, 1.0);
        self.set_trigger_percentage(percentage);

        let moving_up = self.prev_y > y;
        let offset_top = if moving_up {
            distance - self.touch_slop
        } else {
            distance
        };
        self.update_content_offset_top(offset_top);

        if moving_up && self.current_offset_top < self.touch_slop {
            // Back at the top: the user may restart the pull from here.
            self.auto_cancel.cancel();
        } else {
            self.schedule_auto_cancel(this);
        }
        self.prev_y = y;
        self.runtime.schedule();
    }

    fn set_trigger_percentage(&mut self, percentage: f32) {
        self.current_percentage = percentage;
        if percentage == 0.0 {
            return;
        }
        self.indicator.set_trigger_percentage(percentage);
    }

    fn update_content_offset_top(&mut self, offset_top: f32) {
        let trigger = self.effective_trigger_distance();
        let clamped = offset_top.clamp(0.0, trigger);
        self.set_content_offset(clamped);
    }

    fn set_content_offset(&mut self, offset_top: f32) {
        let Some(target) = self.target.clone() else {
            self.current_offset_top = offset_top;
            return;
        };
        let mut target = target.borrow_mut();
        let desired_top = self.original_offset_top + offset_top;
        let dy = desired_top - target.top();
        target.offset_top_and_bottom(dy);
        self.current_offset_top = target.top() - self.original_offset_top;
    }

    fn schedule_auto_cancel(&mut self, this: &Rc<RefCell<Self>>) {
        let weak = Rc::downgrade(this);
        let timeout = self.config.return_timeout_ms;
        let runtime = self.runtime.clone();
        self.auto_cancel.schedule(&runtime, timeout, move || {
            if let Some(strong) = weak.upgrade() {
                strong.borrow_mut().cancel_pull(&strong, "timeout");
            }
        });
    }

    fn start_refresh(&mut self, this: &Rc<RefCell<Self>>) -> Outcome {
        self.auto_cancel.cancel();
        self.transition(PullState::Triggered, "trigger distance reached");
        self.returning_to_start = true;
        self.animate_offset_to_start(this);
        self.set_refreshing(this, true, "pull");
        Outcome {
            handled: true,
            refresh: true,
        }
    }

    /// Abandons the pull: percentage and offset return to rest together.
    fn cancel_pull(&mut self, this: &Rc<RefCell<Self>>, cause: &str) {
        self.returning_to_start = true;
        self.transition(PullState::Returning, cause);
        self.returns_in_flight = 2;

        let from = self.current_percentage;
        let weak = Rc::downgrade(this);
        let on_complete = weak.clone();
        self.animator.start(
            AnimationSlot::PercentageShrink,
            AnimationTask::new(from, 0.0, self.config.return_spec())
                .on_tick(move |percentage| {
                    if let Some(strong) = weak.upgrade() {
                        strong
                            .borrow_mut()
                            .indicator
                            .set_trigger_percentage(percentage);
                    }
                })
                .on_complete(move || {
                    if let Some(strong) = on_complete.upgrade() {
                        let mut inner = strong.borrow_mut();
                        inner.current_percentage = 0.0;
                        inner.finish_return();
                    }
                }),
        );
        self.animate_offset_to_start(this);
    }

    fn animate_offset_to_start(&mut self, this: &Rc<RefCell<Self>>) {
        let from = self.current_offset_top;
        let weak = Rc::downgrade(this);
        let on_complete = weak.clone();
        self.animator.start(
            AnimationSlot::OffsetReturn,
            AnimationTask::new(from, 0.0, self.config.return_spec())
                .on_tick(move |offset| {
                    if let Some(strong) = weak.upgrade() {
                        strong.borrow_mut().set_content_offset(offset.max(0.0));
                    }
                })
                .on_complete(move || {
                    if let Some(strong) = on_complete.upgrade() {
                        let mut inner = strong.borrow_mut();
                        inner.set_content_offset(0.0);
                        inner.current_offset_top = 0.0;
                        inner.finish_return();
                    }
                }),
        );
    }

    fn finish_return(&mut self) {
        self.returns_in_flight = self.returns_in_flight.saturating_sub(1);
        if self.returns_in_flight == 0 && self.state == PullState::Returning {
            self.current_percentage = 0.0;
            self.indicator.set_trigger_percentage(0.0);
            self.set_content_offset(0.0);
            self.transition(PullState::Idle, "returned to start");
        }
        self.runtime.schedule();
    }

    fn set_refreshing(&mut self, this: &Rc<RefCell<Self>>, refreshing: bool, cause: &str) {
        if self.refreshing == refreshing {
            log::trace!("set_refreshing({refreshing}) ignored, already in that state");
            return;
        }
        self.current_percentage = 0.0;
        self.refreshing = refreshing;
        let now = self.runtime.now_millis();
        if refreshing {
            match self.state {
                PullState::Tracking => {
                    // Forced refresh ends the drag in progress.
                    self.auto_cancel.cancel();
                    self.classifier.reset();
                    self.returning_to_start = true;
                    if self.current_offset_top > 0.0 {
                        self.animate_offset_to_start(this);
                    }
                }
                PullState::Returning => {
                    self.animator.cancel(AnimationSlot::PercentageShrink);
                }
                _ => {}
            }
            self.indicator.set_trigger_percentage(0.0);
            self.indicator.start(now);
            self.transition(PullState::Refreshing, cause);
        } else {
            self.indicator.stop(now);
            self.transition(PullState::Idle, cause);
        }
        self.runtime.schedule();
    }

    fn reset_gesture(&mut self, cause: &str) {
        self.animator.cancel_all();
        self.classifier.reset();
        self.returns_in_flight = 0;
        self.returning_to_start = false;
        self.current_percentage = 0.0;
        self.indicator.set_trigger_percentage(0.0);
        self.set_content_offset(0.0);
        let resting = if self.refreshing {
            PullState::Refreshing
        } else {
            PullState::Idle
        };
        self.transition(resting, cause);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
