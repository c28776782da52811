// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_helpers::{create, fake_registry, job, next_event, provider, FailingStore};
use jr_adapters::{FakeBehavior, FakeProvider, FakePublisher, ProviderCall};
use jr_core::{FakeClock, State, Subscription, SystemClock};
use jr_storage::WalStore;

fn executor(
    store: &WalStore,
    fake: &FakeProvider,
    bus: &EventBus,
    job: Job,
) -> JobExecutor<WalStore, SystemClock> {
    let registry = fake_registry(fake, &FakePublisher::default());
    JobExecutor::new(job, store.clone(), Arc::new(registry), bus.clone(), SystemClock)
}

#[tokio::test]
async fn successful_provider_completes_job_with_result() {
    let store = WalStore::in_memory();
    let bus = EventBus::new();
    let mut events = bus.subscribe(Subscription::to("test", "job:completed"));
    let fake = provider(FakeBehavior::Succeed(Some("ok".into())));
    let clock = FakeClock::new();
    let job = create(&store, job("a"));

    let registry = fake_registry(&fake, &FakePublisher::default());
    let executor = JobExecutor::new(job, store.clone(), Arc::new(registry), bus, clock.clone());
    let completed = executor.run().await.unwrap();

    assert_eq!(completed.state(), State::Completed);
    assert!(completed.success);
    assert_eq!(completed.result(), Some("ok"));
    assert_eq!(completed.completed(), Some(clock.now()));
    assert!(completed.completed() >= completed.started());
    assert_eq!(store.load("a").unwrap(), completed);
    assert_eq!(
        next_event(&mut events).await,
        JobEvent::completed("a", Some("ok".into()))
    );
}

#[tokio::test]
async fn unknown_provider_completes_unsuccessfully() {
    let store = WalStore::in_memory();
    let bus = EventBus::new();
    let mut events = bus.subscribe(Subscription::to("test", "job:completed"));
    let mut unresolvable = job("b");
    unresolvable.provider = "com.example.Missing".into();
    let job = create(&store, unresolvable);

    let completed = executor(&store, &FakeProvider::default(), &bus, job)
        .run()
        .await
        .unwrap();

    assert_eq!(completed.state(), State::Completed);
    assert!(!completed.success);
    assert_eq!(completed.result(), None);
    assert!(completed.started().is_some());
    assert!(completed.messages()[0].contains("unknown capability"));
    assert_eq!(next_event(&mut events).await, JobEvent::completed("b", None));
}

#[tokio::test]
async fn missing_payload_is_rejected_without_touching_the_store() {
    let store = WalStore::in_memory();
    let bus = EventBus::new();
    let mut events = bus.subscribe(Subscription::to("test", "**"));
    let job = create(&store, Job::new("c", "no payload", "fake", SystemClock.now()));
    let fake = FakeProvider::default();

    let executor = executor(&store, &fake, &bus, job);
    let handle = executor.handle();
    let err = executor.run().await.unwrap_err();

    assert!(matches!(
        err,
        ExecuteError::InvalidJob {
            missing: "payload",
            ..
        }
    ));
    let stored = store.load("c").unwrap();
    assert_eq!(stored.state(), State::Created);
    assert!(stored.started().is_none());
    assert_eq!(fake.process_count(), 0);
    assert!(handle.is_done());
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn missing_uuid_is_rejected() {
    let job = Job::new("", "anonymous", "fake", SystemClock.now()).with_payload("x");

    let err = JobExecutor::<WalStore, SystemClock>::validate(&job).unwrap_err();

    assert!(matches!(err, ExecuteError::InvalidJob { missing: "uuid", .. }));
}

#[tokio::test]
async fn provider_that_reports_failure_keeps_its_result() {
    let store = WalStore::in_memory();
    let fake = provider(FakeBehavior::Fail(Some("partial".into())));
    let job = create(&store, job("d"));

    let completed = executor(&store, &fake, &EventBus::new(), job)
        .run()
        .await
        .unwrap();

    assert!(!completed.success);
    assert_eq!(completed.result(), Some("partial"));
    assert!(completed.messages().is_empty());
}

#[tokio::test]
async fn provider_error_is_recorded_as_unsuccessful() {
    let store = WalStore::in_memory();
    let fake = provider(FakeBehavior::Error("connection refused".into()));
    let job = create(&store, job("e"));

    let completed = executor(&store, &fake, &EventBus::new(), job)
        .run()
        .await
        .unwrap();

    assert_eq!(completed.state(), State::Completed);
    assert!(!completed.success);
    assert!(completed.messages()[0].contains("connection refused"));
}

#[tokio::test]
async fn provider_panic_does_not_escape_the_run() {
    let store = WalStore::in_memory();
    let fake = provider(FakeBehavior::Panic);
    let job = create(&store, job("f"));

    let completed = executor(&store, &fake, &EventBus::new(), job)
        .run()
        .await
        .unwrap();

    assert_eq!(completed.state(), State::Completed);
    assert!(!completed.success);
    assert!(completed.messages()[0].contains("panicked"));
}

#[tokio::test]
async fn cancel_is_forwarded_to_the_active_provider() {
    let store = WalStore::in_memory();
    let fake = provider(FakeBehavior::WaitForCancel);
    let job = create(&store, job("g"));

    let executor = executor(&store, &fake, &EventBus::new(), job);
    let handle = executor.handle();
    let run = tokio::spawn(executor.run());

    while fake.process_count() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(handle.is_executing());
    handle.cancel();

    let completed = run.await.unwrap().unwrap();
    assert_eq!(completed.state(), State::Completed);
    assert!(!completed.success);
    assert!(completed.messages()[0].contains("cancelled"));
    assert!(fake.calls().contains(&ProviderCall::Cancel));
    assert!(!handle.is_executing());
}

#[tokio::test]
async fn cancel_before_provider_exists_is_a_no_op() {
    let store = WalStore::in_memory();
    let fake = FakeProvider::default();
    let job = create(&store, job("h"));

    let executor = executor(&store, &fake, &EventBus::new(), job);
    executor.handle().cancel();
    let completed = executor.run().await.unwrap();

    assert!(completed.success);
    assert!(!fake.calls().contains(&ProviderCall::Cancel));
}

#[tokio::test]
async fn timeout_completes_a_hung_provider() {
    let store = WalStore::in_memory();
    let fake = provider(FakeBehavior::Hang);
    let job = create(&store, job("i"));

    let completed = executor(&store, &fake, &EventBus::new(), job)
        .with_timeout(Some(Duration::from_millis(50)))
        .run()
        .await
        .unwrap();

    assert_eq!(completed.state(), State::Completed);
    assert!(!completed.success);
    assert!(completed.messages()[0].contains("timed out"));
    assert!(fake.calls().contains(&ProviderCall::Cancel));
}

#[tokio::test]
async fn wait_for_returns_once_the_run_is_done() {
    let store = WalStore::in_memory();
    let fake = provider(FakeBehavior::Sleep(Duration::from_millis(30)));
    let job = create(&store, job("j"));

    let executor = executor(&store, &fake, &EventBus::new(), job);
    let handle = executor.handle();
    assert!(!handle.is_done());
    tokio::spawn(executor.run());

    handle.wait_for().await;

    assert!(handle.is_done());
    assert_eq!(store.load("j").unwrap().state(), State::Completed);
    // a second wait does not block
    handle.wait_for().await;
}

#[tokio::test]
async fn store_failure_on_completion_is_surfaced() {
    let store = FailingStore::new("job_complete");
    let bus = EventBus::new();
    let mut events = bus.subscribe(Subscription::to("test", "job:completed"));
    let fake = FakeProvider::default();
    let job = create(&store, job("k"));

    let registry = fake_registry(&fake, &FakePublisher::default());
    let executor = JobExecutor::new(job, store.clone(), Arc::new(registry), bus, SystemClock);
    let handle = executor.handle();
    let err = executor.run().await.unwrap_err();

    assert!(matches!(err, ExecuteError::Store(StoreError::Unavailable(_))));
    assert!(handle.is_done());
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn hundred_concurrent_jobs_do_not_share_results() {
    let store = WalStore::in_memory();
    let bus = EventBus::new();
    let fake = provider(FakeBehavior::Sleep(Duration::from_millis(10)));
    let registry = Arc::new(fake_registry(&fake, &FakePublisher::default()));

    let runs: Vec<_> = (0..100)
        .map(|n| {
            let job = create(&store, job(&format!("job-{n}")));
            let executor =
                JobExecutor::new(job, store.clone(), Arc::clone(&registry), bus.clone(), SystemClock);
            tokio::spawn(executor.run())
        })
        .collect();

    for run in runs {
        let completed = run.await.unwrap().unwrap();
        assert!(completed.success);
        assert_eq!(completed.result(), completed.payload.as_deref());
    }
    for stored in store.list().unwrap() {
        assert_eq!(stored.state(), State::Completed);
        assert_eq!(stored.result(), Some(stored.uuid()));
    }
    assert_eq!(fake.process_count(), 100);
}
