//! # Concurrency Tests using Loom
//!
//! Models the shutdown path of the run orchestrator: one task triggers the
//! Ctrl-C `CancellationToken` while pending test tasks race to observe it
//! before starting their pipeline.

#[cfg(test)]
mod tests {
    use loom::sync::atomic::{AtomicUsize, Ordering};
    use loom::sync::Arc;
    use loom::thread;
    use tokio_util::sync::CancellationToken;

    /// Models the race between the signal handler cancelling the run and a
    /// pending test checking `is_cancelled()` before it starts compiling.
    ///
    /// The full orchestrator (a `buffer_unordered` stream of spawned
    /// pipelines) is too deep for loom to explore exhaustively; two racing
    /// tasks are enough to cover the token's acquire/release behavior,
    /// which is what the skip-on-shutdown guarantee rests on.
    #[test]
    fn shutdown_cancellation_is_thread_safe() {
        // Loom explores interleavings deeply; give the model thread room.
        const STACK_SIZE: usize = 8 * 1024 * 1024;

        let builder = std::thread::Builder::new()
            .name("loom-model-thread".into())
            .stack_size(STACK_SIZE);

        let handle = builder
            .spawn(|| {
                loom::model(|| {
                    let token = CancellationToken::new();
                    let started = Arc::new(AtomicUsize::new(0));

                    // The "signal handler": cancels the run.
                    let canceller = {
                        let token = token.clone();
                        thread::spawn(move || {
                            token.cancel();
                        })
                    };

                    // A pending test: either observes the cancellation and
                    // skips, or starts its pipeline.
                    let worker = {
                        let token = token.clone();
                        let started = started.clone();
                        thread::spawn(move || {
                            if !token.is_cancelled() {
                                started.fetch_add(1, Ordering::SeqCst);
                            }
                        })
                    };

                    canceller.join().unwrap();
                    worker.join().unwrap();

                    // After both complete the token is cancelled, and at
                    // most one pipeline can have started.
                    assert!(token.is_cancelled());
                    assert!(started.load(Ordering::SeqCst) <= 1);
                });
            })
            .unwrap();

        handle.join().unwrap();
    }
}
