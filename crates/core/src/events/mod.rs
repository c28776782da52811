// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process event bus connecting execution, publishing and listeners
//!
//! - `EventBus` - fan out job events to matching subscribers
//! - `EventPattern` - name matching for subscriptions (`job:*`, `**`)

mod bus;
mod subscription;

pub use bus::{EventBus, EventReceiver, EventSender};
pub use subscription::{EventPattern, SubscriberId, Subscription};
