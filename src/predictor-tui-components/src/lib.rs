//! # Predictor TUI Components
//!
//! Form widgets for the startup predictor terminal UI.
//!
//! Each field keeps its own state machine and exposes it through the
//! [`Component`](component::Component) trait: the application routes keys to
//! the focused field, reads back a [`ComponentResult`](component::ComponentResult)
//! and mirrors reported changes into its form record. Geometry is computed by
//! `layout` methods so pointer hit-testing and rendering agree.
//!
//! ## Fields
//!
//! - [`ComboboxState`](combobox::ComboboxState) - searchable single select
//! - [`MultiSelectState`](multi_select::MultiSelectState) - checkbox panel with chips
//! - [`ChoiceField`](choice::ChoiceField) - arrow-key cycled choice
//! - [`YearInput`](input::YearInput) - bounded numeric year
//!
//! ## Support
//!
//! - [`filter`] - case-insensitive substring matching
//! - [`FocusRing`](focus::FocusRing) - Tab order
//! - [`PointerHub`](subscription::PointerHub) - outside-press dismissal
//! - [`Viewport`](viewport::Viewport) - list scrolling
//! - [`LoadingSpinner`](spinner::LoadingSpinner)

pub mod choice;
pub mod combobox;
pub mod component;
pub mod filter;
pub mod focus;
pub mod input;
pub mod multi_select;
pub mod spinner;
pub mod style;
pub mod subscription;
pub mod viewport;

pub mod prelude {
    //! Common imports for building a form.

    pub use crate::choice::{Choice, ChoiceField};
    pub use crate::combobox::{ComboboxChange, ComboboxLayout, ComboboxState};
    pub use crate::component::{Component, ComponentResult};
    pub use crate::filter::{filter_options, matching_indices};
    pub use crate::focus::{FocusDirection, FocusRing};
    pub use crate::input::{TextBuffer, YearInput};
    pub use crate::multi_select::{MultiSelectLayout, MultiSelectState, humanize_label};
    pub use crate::spinner::LoadingSpinner;
    pub use crate::subscription::{PointerHub, Subscription, SubscriptionId};
    pub use crate::viewport::Viewport;
}
