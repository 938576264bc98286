use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::errors::render::RenderFailure;
use crate::controllers::interactive::events::render::RenderEvent;
use crate::controllers::interactive::ports::presenter::InteractiveControllerPresenterPort;
use crate::core::actions::render::render::{render_cancelable, RenderError};
use crate::core::data::render_request::RenderRequest;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, trace};

struct SharedState {
    generation: AtomicU64,
    last_completed_generation: AtomicU64,
    latest_request: Mutex<Option<(u64, RenderRequest)>>,
    wake: Condvar,
    shutdown: AtomicBool,
    presenter_port: Arc<dyn InteractiveControllerPresenterPort>,
}

impl SharedState {
    fn is_current(&self, generation: u64) -> bool {
        generation == self.generation.load(Ordering::Acquire)
    }

    fn complete(&self, generation: u64) {
        self.last_completed_generation
            .store(generation, Ordering::Release);
    }

    /// Presents `event` only if `generation` is still the newest. Holds the
    /// request lock across the check and the call, so a submit either lands
    /// before the check or waits until the presenter returns.
    fn present_if_current(&self, generation: u64, event: RenderEvent, completes: bool) -> bool {
        let _guard = self
            .latest_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !self.is_current(generation) {
            return false;
        }

        self.presenter_port.present(event);
        if completes {
            self.complete(generation);
        }
        true
    }
}

pub struct InteractiveController {
    shared: Arc<SharedState>,
    worker: Option<JoinHandle<()>>,
}

impl InteractiveController {
    pub fn new(presenter_port: Arc<dyn InteractiveControllerPresenterPort>) -> Self {
        let shared = Arc::new(SharedState {
            generation: AtomicU64::new(0),
            last_completed_generation: AtomicU64::new(0),
            latest_request: Mutex::new(None),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            presenter_port,
        });

        let worker_shared = Arc::clone(&shared);

        let worker = thread::spawn(move || {
            Self::worker_loop(&worker_shared);
        });

        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Replaces any pending request and supersedes the running job.
    ///
    /// Blocks while the worker is inside the presenter, so no event from an
    /// older generation is presented after this returns.
    pub fn submit_request(&self, request: RenderRequest) -> u64 {
        let generation = {
            let mut guard = self
                .shared
                .latest_request
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *guard = Some((generation, request));
            generation
        };

        self.shared.wake.notify_one();
        debug!(generation, mode = ?request.mode, "render request submitted");

        generation
    }

    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake.notify_one();

        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }

    /// Generation of the newest job that delivered its final frame or failed.
    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.shared
            .last_completed_generation
            .load(Ordering::Acquire)
    }

    fn worker_loop(shared: &Arc<SharedState>) {
        loop {
            let (job_generation, request) = {
                let mut guard = shared
                    .latest_request
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                loop {
                    if shared.shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    if let Some(req) = guard.take() {
                        break req;
                    }

                    guard = shared
                        .wake
                        .wait(guard)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            };

            Self::run_job(shared, job_generation, request);
        }
    }

    fn run_job(shared: &SharedState, job_generation: u64, request: RenderRequest) {
        let cancel_token = || {
            shared.shutdown.load(Ordering::Relaxed)
                || job_generation != shared.generation.load(Ordering::Relaxed)
        };

        let stages = match render_cancelable(request, cancel_token) {
            Ok(stages) => stages,
            Err(err) => {
                Self::report_failure(shared, job_generation, err.to_string());
                return;
            }
        };

        let start = Instant::now();

        for result in stages {
            match result {
                Ok(frame) => {
                    let is_final = frame.is_final;
                    let event = RenderEvent::Frame(FrameData {
                        generation: job_generation,
                        frame,
                        render_duration: start.elapsed(),
                    });

                    if !shared.present_if_current(job_generation, event, is_final) {
                        trace!(generation = job_generation, "dropping superseded frame");
                        return;
                    }
                }
                Err(RenderError::Cancelled(_)) => {
                    trace!(generation = job_generation, "job cancelled");
                    return;
                }
                Err(err) => {
                    Self::report_failure(shared, job_generation, err.to_string());
                    return;
                }
            }
        }
    }

    fn report_failure(shared: &SharedState, generation: u64, message: String) {
        debug!(generation, %message, "render job failed");
        let event = RenderEvent::Error(RenderFailure {
            generation,
            message,
        });

        if !shared.present_if_current(generation, event, true) {
            trace!(generation, "dropping superseded failure");
        }
    }
}

impl Drop for InteractiveController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{mpsc, Mutex};
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::core::data::render_request::{DisplayConfig, FidelityMode};
    use crate::core::data::viewport::Viewport;

    #[derive(Default)]
    struct MockPresenterPort {
        events: Mutex<Vec<RenderEvent>>,
    }

    impl MockPresenterPort {
        fn take_events(&self) -> Vec<RenderEvent> {
            let mut guard = self.events.lock().unwrap();
            std::mem::take(&mut *guard)
        }
    }

    impl InteractiveControllerPresenterPort for MockPresenterPort {
        fn present(&self, event: RenderEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn ends_job(event: &RenderEvent) -> bool {
        match event {
            RenderEvent::Frame(frame) => frame.frame.is_final,
            RenderEvent::Error(_) => true,
        }
    }

    /// Collects events until one finishes a job or the timeout passes.
    fn wait_for_completion(sink: &MockPresenterPort, timeout: Duration) -> Vec<RenderEvent> {
        let start = Instant::now();
        let mut collected = Vec::new();
        loop {
            collected.extend(sink.take_events());
            if collected.iter().any(ends_job) || start.elapsed() >= timeout {
                return collected;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn wait_for_generation(controller: &InteractiveController, generation: u64, timeout: Duration) {
        let start = Instant::now();
        while controller.last_completed_generation() < generation && start.elapsed() < timeout {
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn create_controller() -> (Arc<MockPresenterPort>, InteractiveController) {
        let presenter_port = Arc::new(MockPresenterPort::default());
        let controller = InteractiveController::new(
            Arc::clone(&presenter_port) as Arc<dyn InteractiveControllerPresenterPort>
        );
        (presenter_port, controller)
    }

    fn create_test_request(mode: FidelityMode) -> RenderRequest {
        RenderRequest::new(12, 8, Viewport::default(), mode).with_display(DisplayConfig {
            detail_level: 1,
            ..DisplayConfig::default()
        })
    }

    fn create_error_request() -> RenderRequest {
        RenderRequest::new(0, 8, Viewport::default(), FidelityMode::Interactive)
    }

    fn extract_generation(events: &[RenderEvent]) -> u64 {
        events
            .iter()
            .find_map(|e| match e {
                RenderEvent::Frame(frame) => Some(frame.generation),
                RenderEvent::Error(err) => Some(err.generation),
            })
            .expect("Should have at least one event with generation")
    }

    #[test]
    fn test_submit_interactive_request_emits_single_final_frame() {
        let (presenter_port, mut controller) = create_controller();

        let generation = controller.submit_request(create_test_request(FidelityMode::Interactive));
        let events = wait_for_completion(presenter_port.as_ref(), Duration::from_secs(5));

        assert_eq!(events.len(), 1, "expected exactly one event");
        match &events[0] {
            RenderEvent::Frame(frame) => {
                assert_eq!(frame.generation, generation);
                assert!(frame.frame.is_final);
                assert_eq!(frame.frame.pixel_buffer.buffer().len(), 12 * 8 * 4);
            }
            RenderEvent::Error(error) => panic!("unexpected render error: {}", error.message),
        }

        controller.shutdown();
    }

    #[test]
    fn test_submit_progressive_request_emits_both_stages_in_order() {
        let (presenter_port, mut controller) = create_controller();

        let generation = controller.submit_request(create_test_request(FidelityMode::Progressive));
        let events = wait_for_completion(presenter_port.as_ref(), Duration::from_secs(5));

        let frames: Vec<_> = events
            .iter()
            .map(|event| match event {
                RenderEvent::Frame(frame) => frame,
                RenderEvent::Error(error) => panic!("unexpected render error: {}", error.message),
            })
            .collect();

        assert_eq!(frames.len(), 2);
        assert!(frames.iter().all(|frame| frame.generation == generation));
        assert!(!frames[0].frame.is_final);
        assert!(frames[1].frame.is_final);
        assert!(frames[1].frame.max_hits >= frames[0].frame.max_hits);
        assert!(frames[1].render_duration >= frames[0].render_duration);

        controller.shutdown();
    }

    #[test]
    fn test_generation_ids_increment() {
        let (presenter_port, mut controller) = create_controller();
        let request = create_test_request(FidelityMode::Interactive);

        controller.submit_request(request);
        let events_a = wait_for_completion(presenter_port.as_ref(), Duration::from_secs(5));
        assert!(!events_a.is_empty(), "expected events from request A");
        let gen_a = extract_generation(&events_a);

        controller.submit_request(request);
        let events_b = wait_for_completion(presenter_port.as_ref(), Duration::from_secs(5));
        assert!(!events_b.is_empty(), "expected events from request B");
        let gen_b = extract_generation(&events_b);

        assert!(
            gen_b > gen_a,
            "Generation B ({}) should be greater than A ({})",
            gen_b,
            gen_a
        );

        controller.shutdown();
    }

    #[test]
    fn test_last_completed_generation_starts_at_zero() {
        let (_presenter_port, mut controller) = create_controller();

        assert_eq!(controller.last_completed_generation(), 0);

        controller.shutdown();
    }

    #[test]
    fn test_last_completed_generation_updates_after_final_frame() {
        let (presenter_port, mut controller) = create_controller();

        let submitted_generation =
            controller.submit_request(create_test_request(FidelityMode::Progressive));
        let events = wait_for_completion(presenter_port.as_ref(), Duration::from_secs(5));
        assert!(!events.is_empty(), "expected a render event");

        assert_eq!(extract_generation(&events), submitted_generation);
        assert_eq!(controller.last_completed_generation(), submitted_generation);

        controller.shutdown();
    }

    #[test]
    fn test_invalid_request_reports_error_and_completes() {
        let (presenter_port, mut controller) = create_controller();

        let submitted_generation = controller.submit_request(create_error_request());
        let events = wait_for_completion(presenter_port.as_ref(), Duration::from_secs(5));

        let errors: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                RenderEvent::Error(error) => Some(error),
                RenderEvent::Frame(_) => None,
            })
            .collect();

        assert_eq!(errors.len(), 1, "expected one error event");
        assert_eq!(errors[0].generation, submitted_generation);
        assert!(errors[0].message.contains("0x8"));
        assert_eq!(controller.last_completed_generation(), submitted_generation);

        controller.shutdown();
    }

    #[test]
    fn test_last_completed_generation_is_monotonic_across_mixed_completions() {
        let (presenter_port, mut controller) = create_controller();

        let frame_generation =
            controller.submit_request(create_test_request(FidelityMode::Interactive));
        let frame_events = wait_for_completion(presenter_port.as_ref(), Duration::from_secs(5));
        assert_eq!(extract_generation(&frame_events), frame_generation);
        let after_frame = controller.last_completed_generation();

        let error_generation = controller.submit_request(create_error_request());
        let error_events = wait_for_completion(presenter_port.as_ref(), Duration::from_secs(5));
        assert_eq!(extract_generation(&error_events), error_generation);
        let after_error = controller.last_completed_generation();

        let frame_generation_2 =
            controller.submit_request(create_test_request(FidelityMode::Progressive));
        let frame_events_2 = wait_for_completion(presenter_port.as_ref(), Duration::from_secs(5));
        assert_eq!(extract_generation(&frame_events_2), frame_generation_2);
        let after_frame_2 = controller.last_completed_generation();

        assert!(after_frame >= frame_generation);
        assert!(after_error >= after_frame);
        assert!(after_frame_2 >= after_error);

        controller.shutdown();
    }

    #[test]
    fn test_rapid_requests_do_not_emit_cancellation_errors() {
        let (presenter_port, mut controller) = create_controller();
        let request = RenderRequest::new(200, 150, Viewport::default(), FidelityMode::Progressive);

        let mut last_gen = 0;
        for _ in 0..5 {
            last_gen = controller.submit_request(request);
        }

        wait_for_generation(&controller, last_gen, Duration::from_secs(30));
        let events = presenter_port.take_events();

        for event in &events {
            if let RenderEvent::Error(err) = event {
                panic!(
                    "Unexpected error event - cancellation should not emit errors: {}",
                    err.message
                );
            }
        }

        assert_eq!(controller.last_completed_generation(), last_gen);
        let final_frames: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Frame(frame) if frame.frame.is_final => Some(frame.generation),
                _ => None,
            })
            .collect();
        assert_eq!(final_frames.last(), Some(&last_gen));

        controller.shutdown();
    }

    #[test]
    fn test_presented_generations_never_go_backwards() {
        let (presenter_port, mut controller) = create_controller();
        let slow = RenderRequest::new(300, 200, Viewport::new(3.5, 3.6, 0.3, 0.9), FidelityMode::Progressive);

        controller.submit_request(slow);
        thread::sleep(Duration::from_millis(5));
        let last_gen = controller.submit_request(create_test_request(FidelityMode::Progressive));

        wait_for_generation(&controller, last_gen, Duration::from_secs(30));
        let generations: Vec<u64> = presenter_port
            .take_events()
            .iter()
            .map(|e| match e {
                RenderEvent::Frame(frame) => frame.generation,
                RenderEvent::Error(err) => panic!("unexpected render error: {}", err.message),
            })
            .collect();

        assert!(generations.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(generations.last(), Some(&last_gen));

        controller.shutdown();
    }

    /// Stalls inside the first `present` call and records events only once
    /// that call returns.
    struct StallingPresenterPort {
        events: Mutex<Vec<RenderEvent>>,
        entered: Mutex<Option<mpsc::Sender<()>>>,
    }

    impl InteractiveControllerPresenterPort for StallingPresenterPort {
        fn present(&self, event: RenderEvent) {
            let entered = self.entered.lock().unwrap().take();
            if let Some(entered) = entered {
                entered.send(()).unwrap();
                thread::sleep(Duration::from_millis(100));
            }
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_submit_waits_for_in_flight_present() {
        let (entered_tx, entered_rx) = mpsc::channel();
        let presenter_port = Arc::new(StallingPresenterPort {
            events: Mutex::new(Vec::new()),
            entered: Mutex::new(Some(entered_tx)),
        });
        let mut controller = InteractiveController::new(
            Arc::clone(&presenter_port) as Arc<dyn InteractiveControllerPresenterPort>
        );

        let first = controller.submit_request(create_test_request(FidelityMode::Progressive));
        entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = controller.submit_request(create_test_request(FidelityMode::Progressive));
        let seen_at_submit = presenter_port.events.lock().unwrap().len();

        wait_for_generation(&controller, second, Duration::from_secs(5));
        let generations: Vec<u64> = presenter_port
            .events
            .lock()
            .unwrap()
            .iter()
            .map(|e| match e {
                RenderEvent::Frame(frame) => frame.generation,
                RenderEvent::Error(err) => panic!("unexpected render error: {}", err.message),
            })
            .collect();

        assert_eq!(seen_at_submit, 1, "in-flight frame should land before submit returns");
        assert_eq!(generations[0], first);
        assert!(generations[seen_at_submit..].iter().all(|&g| g == second));
        assert_eq!(generations.last(), Some(&second));

        controller.shutdown();
    }

    #[test]
    fn test_drop_stops_worker() {
        let (presenter_port, controller) = create_controller();
        controller.submit_request(create_test_request(FidelityMode::Interactive));

        drop(controller);
        let settled = presenter_port.take_events().len();
        thread::sleep(Duration::from_millis(50));

        assert_eq!(presenter_port.take_events().len(), 0, "{} events before drop", settled);
    }
}
