// SPDX-License-Identifier: LGPL-3.0-only
pub mod bus;
pub mod error;
pub mod events;
pub mod service;
pub mod settings;

// Re-export commonly used types
pub use bus::{ClipboardBusService, ClipboardFault, ClipboardProxy};
pub use error::ServiceError;
pub use events::{ClipboardEvent, ClipboardEventReceiver};
pub use service::ClipboardService;
pub use settings::SettingsRegistry;
