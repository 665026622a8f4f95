use ziggurat_scene::SceneData;

use crate::error::HierarchyError;

/// An `(object, parent)` entry of a parent field. `None` marks a top-level object.
pub type ParentEntry = (u32, Option<u32>);

/// Orders `(object, parent)` pairs so that parents come before their children.
///
/// The output is grouped into clusters, one per root, each contiguous and
/// laid out breadth-first so siblings sit next to each other. A root is an
/// entry whose parent is `None` or whose parent has no entry of its own.
///
/// Runs in O(m + n) time and memory, `m` being the number of pairs and `n`
/// the mapping bound. Object and parent indices must be below
/// `mapping_bound`; anything else is rejected before work starts.
///
/// The pairs are expected to have no cycles and no duplicate objects. This is
/// not checked: entries in a cycle never get emitted, so the output is then
/// shorter than the input, and duplicates may be emitted more than once up to
/// the input length.
pub fn cluster_parents(
    pairs: &[ParentEntry],
    mapping_bound: u32,
) -> Result<Vec<ParentEntry>, HierarchyError> {
    check_bounds(pairs, mapping_bound)?;
    let mut out = vec![(0, None); pairs.len()];
    let written = cluster_into(pairs, mapping_bound as usize, &mut out);
    out.truncate(written);
    Ok(out)
}

/// [`cluster_parents`] over the scene's `Parent` field.
pub fn order_cluster_parents(scene: &SceneData) -> Result<Vec<ParentEntry>, HierarchyError> {
    let pairs = scene.parents_as_array().ok_or(HierarchyError::MissingParentField)?;
    cluster_parents(&pairs, scene.mapping_bound())
}

/// Like [`order_cluster_parents`], but fills caller memory.
///
/// `out` must have exactly as many entries as the `Parent` field. Returns the
/// number of entries written, which is smaller than `out.len()` only if the
/// hierarchy has cycles; the remaining entries are left untouched.
pub fn order_cluster_parents_into(
    scene: &SceneData,
    out: &mut [ParentEntry],
) -> Result<usize, HierarchyError> {
    let pairs = scene.parents_as_array().ok_or(HierarchyError::MissingParentField)?;
    if out.len() != pairs.len() {
        return Err(HierarchyError::SizeMismatch { expected: pairs.len(), actual: out.len() });
    }
    check_bounds(&pairs, scene.mapping_bound())?;
    Ok(cluster_into(&pairs, scene.mapping_bound() as usize, out))
}

fn check_bounds(pairs: &[ParentEntry], bound: u32) -> Result<(), HierarchyError> {
    for &(object, parent) in pairs {
        if object >= bound {
            return Err(HierarchyError::ObjectOutOfBounds { object, bound });
        }
        if let Some(parent) = parent.filter(|&p| p >= bound) {
            return Err(HierarchyError::ParentOutOfBounds { parent, bound });
        }
    }
    Ok(())
}

/// Writes the clustered order of `pairs` into `out` and returns the number of
/// entries written. `out.len()` must equal `pairs.len()` and all indices must
/// be below `bound`.
pub(crate) fn cluster_into(pairs: &[ParentEntry], bound: usize, out: &mut [ParentEntry]) -> usize {
    debug_assert_eq!(pairs.len(), out.len());

    let mut present = vec![false; bound];
    for &(object, _) in pairs {
        present[object as usize] = true;
    }

    // Children of parent `p` end up in `children[offsets[p]..offsets[p + 1]]`.
    // Counts go to `p + 2` so that the placement pass, which bumps `p + 1`,
    // leaves the array shifted into final position.
    let mut offsets = vec![0usize; bound + 2];
    let mut roots = Vec::new();
    for (i, &(_, parent)) in pairs.iter().enumerate() {
        match parent {
            Some(p) if present[p as usize] => offsets[p as usize + 2] += 1,
            _ => roots.push(i),
        }
    }
    for i in 1..offsets.len() {
        offsets[i] += offsets[i - 1];
    }

    let mut children = vec![0usize; pairs.len() - roots.len()];
    for (i, &(_, parent)) in pairs.iter().enumerate() {
        if let Some(p) = parent.filter(|&p| present[p as usize]) {
            let slot = &mut offsets[p as usize + 1];
            children[*slot] = i;
            *slot += 1;
        }
    }

    // Breadth-first per root, using the output itself as the queue.
    let mut len = 0;
    'roots: for &root in &roots {
        if len == out.len() {
            break;
        }
        out[len] = pairs[root];
        let mut head = len;
        len += 1;

        while head < len {
            let object = out[head].0 as usize;
            head += 1;
            for &child in &children[offsets[object]..offsets[object + 1]] {
                if len == out.len() {
                    break 'roots;
                }
                out[len] = pairs[child];
                len += 1;
            }
        }
    }

    log::trace!("clustered {len} parent entries into {} clusters", roots.len());
    if len < pairs.len() {
        log::warn!(
            "{} of {} parent entries are not reachable from any root, hierarchy has cycles",
            pairs.len() - len,
            pairs.len()
        );
    }

    len
}
