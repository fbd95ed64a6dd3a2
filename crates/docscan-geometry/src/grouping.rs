use crate::angle::are_thetas_close;
use crate::error::check_tolerance;
use crate::{GeometryError, PolarLine};
use log::debug;

/// Near-parallel lines in input order.
pub type LineGroup = Vec<PolarLine>;

/// Partition lines into groups of near-equal orientation.
///
/// Each group is represented by its first member. A line joins the first
/// group whose representative angle is within `theta_tolerance` of its own
/// (modulo π), otherwise it opens a new group. Groups are ordered by first
/// appearance and every input line lands in exactly one of them.
///
/// For a document photo this separates the roughly horizontal edges from
/// the roughly vertical ones.
pub fn group_by_near_parallel_lines(
    lines: &[PolarLine],
    theta_tolerance: f64,
) -> Result<Vec<LineGroup>, GeometryError> {
    check_tolerance("theta_tolerance", theta_tolerance)?;

    let mut groups: Vec<LineGroup> = Vec::new();
    for line in lines {
        let theta = line.canonical().theta;
        let target = groups.iter_mut().find(|group| {
            group
                .first()
                .is_some_and(|rep| are_thetas_close(theta, rep.canonical().theta, theta_tolerance))
        });
        match target {
            Some(group) => group.push(*line),
            None => groups.push(vec![*line]),
        }
    }

    debug!(
        "{} lines in {} orientation groups {:?}",
        lines.len(),
        groups.len(),
        groups.iter().map(Vec::len).collect::<Vec<_>>()
    );
    Ok(groups)
}
