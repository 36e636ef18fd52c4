use std::cell::RefCell;
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use feedex_testing::{FakeContent, FakeRowList, GestureRobot, RecordingToggles};
use feedex_ui::{
    ItemToggleConfig, ItemToggleDispatcher, MotionSample, PullRefreshConfig,
    PullRefreshController,
};

const MOVE_SAMPLES: &[usize] = &[16, 64, 256];

/// A slow vertical drag that stays below the trigger distance.
fn pull_samples(moves: usize) -> Vec<MotionSample> {
    let mut samples = Vec::with_capacity(moves + 2);
    samples.push(MotionSample::down(240.0, 0.0, 0));
    for step in 1..=moves {
        let y = 100.0 * step as f32 / moves as f32;
        samples.push(MotionSample::move_to(240.0, y, step as u64));
    }
    samples.push(MotionSample::cancel(240.0, 100.0, moves as u64 + 1));
    samples
}

fn fling_samples(moves: usize) -> Vec<MotionSample> {
    let mut samples = Vec::with_capacity(moves + 2);
    samples.push(MotionSample::down(400.0, 100.0, 0));
    for step in 1..=moves {
        let x = 400.0 - 300.0 * step as f32 / moves as f32;
        samples.push(MotionSample::move_to(x, 100.0, step as u64));
    }
    samples.push(MotionSample::up(100.0, 100.0, moves as u64));
    samples
}

fn pull_to_refresh_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("pull_to_refresh");
    for &moves in MOVE_SAMPLES {
        let robot = GestureRobot::new();
        let controller = PullRefreshController::new(robot.handle(), PullRefreshConfig::default());
        let content: Rc<RefCell<FakeContent>> = FakeContent::shared();
        controller.add_child(content).expect("single child");
        controller.measure(480.0, 800.0).expect("measure");
        controller.layout().expect("layout");
        let samples = pull_samples(moves);

        group.bench_with_input(BenchmarkId::from_parameter(moves), &samples, |b, samples| {
            b.iter(|| {
                for sample in samples {
                    black_box(
                        controller
                            .on_intercept_touch_event(sample)
                            .expect("single child"),
                    );
                }
                controller.on_detached();
                controller.on_attached();
            });
        });
    }
    group.finish();
}

fn fling_toggle_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("fling_toggle");
    for &moves in MOVE_SAMPLES {
        let robot = GestureRobot::new();
        let dispatcher = ItemToggleDispatcher::new(
            robot.handle(),
            Rc::new(FakeRowList::uniform(32, 72.0, 480.0, 0)),
            RecordingToggles::shared(),
            ItemToggleConfig::default(),
        );
        let samples = fling_samples(moves);

        group.bench_with_input(BenchmarkId::from_parameter(moves), &samples, |b, samples| {
            b.iter(|| {
                for sample in samples {
                    black_box(dispatcher.on_touch_event(sample));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, pull_to_refresh_throughput, fling_toggle_throughput);
criterion_main!(benches);
