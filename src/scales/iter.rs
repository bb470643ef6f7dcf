//! Walking the scales attached to a dimension.

use std::ops::ControlFlow;

use object_store::ObjectStore;

use crate::object::Dataset;

use super::{check_dim, ScaleError, ScaleRegistry};

/// Outcome of [`ScaleRegistry::iterate_scales`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleWalk<B> {
    /// The visitor never broke; `visited` scales were processed.
    Completed { visited: usize },
    /// The visitor broke at position `index` of the dimension list, handing
    /// back `signal`.
    Stopped { index: usize, signal: B },
}

impl<S: ObjectStore> ScaleRegistry<S> {
    /// Visit the scales attached to dimension `dim` of `target` in
    /// attachment order, starting at `start` (inclusive).
    ///
    /// Each stored reference is resolved to an open handle before the
    /// visitor runs; a reference whose object has vanished fails the walk
    /// with [`ScaleError::ObjectUnavailable`]. A `start` at or past the end
    /// of the list completes immediately without invoking the visitor.
    ///
    /// The visitor stops the walk by returning [`ControlFlow::Break`]; the
    /// break value and the absolute stop position come back in
    /// [`ScaleWalk::Stopped`], so a partial walk can be resumed by passing
    /// an index derived from it back as `start`.
    pub async fn iterate_scales<B, F>(
        &self,
        target: &Dataset,
        dim: usize,
        start: usize,
        mut visitor: F,
    ) -> Result<ScaleWalk<B>, ScaleError>
    where
        F: FnMut(&Dataset, usize, &Dataset) -> ControlFlow<B>,
    {
        check_dim(target, dim)?;

        let Some(dimension_list) = self.read_dimension_list(target).await? else {
            return Ok(ScaleWalk::Completed { visited: 0 });
        };

        let mut visited = 0;
        for (index, scale_ref) in dimension_list[dim].iter().enumerate().skip(start) {
            let scale = self.open_ref(scale_ref).await?;
            visited += 1;
            if let ControlFlow::Break(signal) = visitor(target, dim, &scale) {
                return Ok(ScaleWalk::Stopped { index, signal });
            }
        }
        Ok(ScaleWalk::Completed { visited })
    }
}
