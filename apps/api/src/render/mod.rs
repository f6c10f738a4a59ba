// Render Plan: the backend-agnostic output handed to a drawing collaborator.

pub mod plan;

pub use plan::{DrawBlock, Marker, PageSize, RenderPlan, StyleRef};
