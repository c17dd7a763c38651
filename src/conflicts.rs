use crate::model::{ExamSession, Student};
use serde::Serialize;
use std::collections::HashMap;

/// A student registered for two or more sessions sharing one date/time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictReport {
    pub student: String,
    pub roll_no: String,
    pub subjects: Vec<String>,
    pub exams: String,
    pub date: String,
    pub time: String,
    pub date_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictCheck {
    /// Fewer than two sessions exist, so nothing can overlap.
    NotApplicable,
    Checked(Vec<ConflictReport>),
}

impl ConflictCheck {
    pub fn conflicts(&self) -> &[ConflictReport] {
        match self {
            ConflictCheck::NotApplicable => &[],
            ConflictCheck::Checked(v) => v.as_slice(),
        }
    }
}

type Slot<'a> = (&'a str, &'a str);

/// Buckets sessions by exact (date, time), keeping first-seen slot order.
pub fn group_by_slot(exams: &[ExamSession]) -> Vec<(Slot<'_>, Vec<&ExamSession>)> {
    let mut index: HashMap<Slot<'_>, usize> = HashMap::new();
    let mut slots: Vec<(Slot<'_>, Vec<&ExamSession>)> = Vec::new();
    for exam in exams {
        let key = exam.slot_key();
        match index.get(&key) {
            Some(&i) => slots[i].1.push(exam),
            None => {
                index.insert(key, slots.len());
                slots.push((key, vec![exam]));
            }
        }
    }
    slots
}

pub fn detect_conflicts(students: &[Student], exams: &[ExamSession]) -> ConflictCheck {
    if exams.len() < 2 {
        return ConflictCheck::NotApplicable;
    }

    let mut out = Vec::new();
    for ((date, time), bucket) in group_by_slot(exams) {
        if bucket.len() < 2 {
            continue;
        }
        for student in students {
            let hits: Vec<&ExamSession> = bucket
                .iter()
                .copied()
                .filter(|e| student.takes(&e.subject))
                .collect();
            if hits.len() < 2 {
                continue;
            }
            let subjects: Vec<String> = hits.iter().map(|e| e.subject.clone()).collect();
            out.push(ConflictReport {
                student: student.name.clone(),
                roll_no: student.roll_no.clone(),
                exams: subjects.join(", "),
                subjects,
                date: date.to_string(),
                time: time.to_string(),
                date_time: format!("{}_{}", date, time),
            });
        }
    }
    ConflictCheck::Checked(out)
}
