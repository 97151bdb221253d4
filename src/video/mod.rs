//! Inline video modal: link classification, frame sizing and the modal
//! state machine. Nothing here touches the DOM; see `crate::dom::video`.

pub mod aspect;
pub mod frame;
pub mod modal;
pub mod schedule;
pub mod source;

pub use aspect::AspectRatio;
pub use frame::{compute_frame, compute_frame_within, FrameBounds, FrameSize, Viewport};
pub use modal::{
    DetectionOutcome, DimensionWatch, FrameStyle, ModalRequest, ModalState, ModalSurface,
    OpenedModal, Session, SurfaceKind, VideoModal,
};
pub use schedule::{schedule_probes, Scheduler};
pub use source::{classify, VideoSource};
