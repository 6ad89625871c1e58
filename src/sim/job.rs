use serde::{Deserialize, Serialize};

use crate::{
    core::{ProcessId, ProcessTable},
    error::{InputError, SimResult},
};

// Signed so that negative input reaches validation instead of failing to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub id: ProcessId,
    pub arrival_time: i64,
    pub burst_time: i64,
}

impl ProcessSpec {
    pub fn new(id: ProcessId, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
        }
    }
}

pub fn build_table(specs: &[ProcessSpec]) -> SimResult<ProcessTable> {
    if specs.is_empty() {
        return Err(InputError::Empty.into());
    }

    let mut table = ProcessTable::new();
    for spec in specs {
        table.insert(spec.id, spec.arrival_time, spec.burst_time)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn empty_list_is_rejected() {
        assert!(matches!(
            build_table(&[]),
            Err(SimError::InvalidInput(InputError::Empty))
        ));
    }

    #[test]
    fn keeps_input_order() {
        let table = build_table(&[ProcessSpec::new(5, 3, 1), ProcessSpec::new(2, 0, 4)]).unwrap();
        let ids: Vec<_> = table.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![5, 2]);
        assert_eq!(table.get(2).unwrap().remaining_time, 4);
        assert!(table.get(2).unwrap().completion_time.is_none());
    }
}
