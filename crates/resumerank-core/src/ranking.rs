use crate::{CoreError, RankedResult, ScoredDocument};

/// Order documents by descending score and keep the first `count`.
///
/// The sort is stable: documents with equal scores stay in the order they
/// were given. A negative `count` is rejected rather than treated as "none"
/// or "all".
pub fn rank(mut documents: Vec<ScoredDocument>, count: i64) -> Result<RankedResult, CoreError> {
    let count = usize::try_from(count).map_err(|_| {
        CoreError::InvalidArgument(format!("count must be non-negative, got {}", count))
    })?;

    documents.sort_by(|a, b| b.score.total_cmp(&a.score));
    documents.truncate(count);
    Ok(documents)
}
