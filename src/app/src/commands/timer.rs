//! Timer command definitions.
//!
//! The Shell owns the real clock and the `setTimeout` handles; the Core only
//! refers to timers by the ids it allocates.

use crux_core::{capability::Operation, command, Command};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::marker::PhantomData;

// Operations that the Shell needs to perform for timers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerOperation {
    /// Read the wall clock
    Now,
    /// Resolve once after `millis` milliseconds
    Start { id: u64, millis: u64 },
    /// Cancel a pending `Start` with the same id
    Cancel { id: u64 },
}

// The output from timer operations (shell tells us what happened)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimerOutput {
    /// Milliseconds since the Unix epoch
    Now { millis: u64 },
    Elapsed { id: u64 },
    Cancelled { id: u64 },
}

impl Operation for TimerOperation {
    type Output = TimerOutput;
}

/// Command-based timer API
pub struct Timer<Effect, Event> {
    _effect: PhantomData<Effect>,
    _event: PhantomData<Event>,
}

impl<Effect, Event> Timer<Effect, Event>
where
    Effect: Send + From<crux_core::Request<TimerOperation>> + 'static,
    Event: Send + 'static,
{
    /// Current wall clock time in milliseconds since the Unix epoch.
    ///
    /// Resolves to `None` when the shell answers with anything but `Now`.
    pub fn now() -> command::RequestBuilder<Effect, Event, impl Future<Output = Option<u64>>> {
        command::RequestBuilder::new(|ctx| async move {
            match Command::request_from_shell(TimerOperation::Now)
                .into_future(ctx)
                .await
            {
                TimerOutput::Now { millis } => Some(millis),
                other => {
                    log::warn!("Unexpected timer output for Now: {other:?}");
                    None
                }
            }
        })
    }

    /// Arm a one-shot timer
    pub fn start(id: u64, millis: u64) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(TimerOperation::Start { id, millis })
    }

    /// Cancel a previously armed timer
    pub fn cancel(id: u64) -> RequestBuilder<Effect, Event> {
        RequestBuilder::new(TimerOperation::Cancel { id })
    }
}

/// Request builder for timer operations
#[must_use]
pub struct RequestBuilder<Effect, Event> {
    operation: TimerOperation,
    _effect: PhantomData<Effect>,
    _event: PhantomData<fn() -> Event>,
}

impl<Effect, Event> RequestBuilder<Effect, Event>
where
    Effect: Send + From<crux_core::Request<TimerOperation>> + 'static,
    Event: Send + 'static,
{
    fn new(operation: TimerOperation) -> Self {
        Self {
            operation,
            _effect: PhantomData,
            _event: PhantomData,
        }
    }

    /// Build the request into a Command RequestBuilder
    pub fn build(
        self,
    ) -> command::RequestBuilder<Effect, Event, impl Future<Output = TimerOutput>> {
        command::RequestBuilder::new(move |ctx| async move {
            Command::request_from_shell(self.operation)
                .into_future(ctx)
                .await
        })
    }
}
