//! Department routing — which boards receive one task.
//!
//! Four sources contribute, in priority order: the assignee's memberships,
//! the memberships of every employee mentioned in the task text, the role
//! keyword table, and finally the registry's default department. The first
//! two always accumulate (a task can fan out across departments); role and
//! default only apply when the set is still empty.

use courier_core::types::{DepartmentId, Task};
use courier_core::{Directory, Registry};

/// Compute the ordered set of target departments for `task`.
///
/// Ordering is deterministic: assignee-derived departments first, then
/// mention-derived in directory order, then the role or default fallback.
/// No identifier repeats. Memberships in departments the registry does not
/// know are skipped — only routable departments count toward the set, so
/// the fallbacks still apply when every membership is unregistered.
///
/// A task is cross-department when the result has two or more entries.
pub fn route(task: &Task, directory: &Directory, registry: &Registry) -> Vec<DepartmentId> {
    let mut targets: Vec<DepartmentId> = Vec::new();

    // 1. Assignee memberships.
    if let Some(assignee) = task.assignee.as_deref() {
        if let Some(employee) = directory.find(assignee) {
            accumulate(&mut targets, &employee.departments, registry);
        }
    }

    // 2. Memberships of everyone mentioned in the text.
    for employee in directory.resolve_mentions(&task.text) {
        accumulate(&mut targets, &employee.departments, registry);
    }

    // 3. Role keyword fallback, only when nobody resolved.
    if targets.is_empty() {
        if let Some(role) = task.role.as_deref() {
            if let Some(department) = registry.department_for_role(role) {
                targets.push(department.clone());
            }
        }
    }

    // 4. Default department, only when everything else came up empty.
    if targets.is_empty() {
        if let Some(department) = registry.default_department() {
            targets.push(department.clone());
        }
    }

    targets
}

fn accumulate(targets: &mut Vec<DepartmentId>, memberships: &[DepartmentId], registry: &Registry) {
    for department in memberships {
        if registry.is_registered(department) && !targets.contains(department) {
            targets.push(department.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
