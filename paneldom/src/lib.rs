pub mod element;
pub mod event;
pub mod focus;
pub mod html;
pub mod listeners;
pub mod mount;

pub use element::{find_all, find_by_class, find_element, Content, Element, InputType, Tag};
pub use event::{Event, EventKind, Key, Modifiers};
pub use focus::{collect_focusable, FocusState};
pub use html::to_html;
pub use listeners::{Listener, Listeners};
pub use mount::{Document, Mount, View};
