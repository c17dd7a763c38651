use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub roll_no: String,
    pub name: String,
    pub department: String,
    pub subjects: Vec<String>,
}

impl Student {
    pub fn takes(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: String,
    pub name: String,
    pub capacity: u32,
    pub rows: u32,
    pub seats_per_row: u32,
}

impl Room {
    /// Number of physical seats laid out by the grid, independent of `capacity`.
    pub fn grid_seats(&self) -> usize {
        self.rows as usize * self.seats_per_row as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSession {
    pub exam_id: String,
    pub subject: String,
    pub subject_name: String,
    pub date: String,
    pub time: String,
}

impl ExamSession {
    /// Sessions sharing this key sit at the same time.
    pub fn slot_key(&self) -> (&str, &str) {
        (self.date.as_str(), self.time.as_str())
    }
}

/// One student seated in one room for one exam session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub exam_id: String,
    pub exam_subject: String,
    pub exam_name: String,
    pub exam_date: String,
    pub exam_time: String,
    pub room_id: String,
    pub room_name: String,
    pub seat_no: String,
    pub roll_no: String,
    pub student_name: String,
    pub department: String,
}

impl Allocation {
    pub fn new(exam: &ExamSession, room: &Room, seat_no: String, student: &Student) -> Self {
        Self {
            exam_id: exam.exam_id.clone(),
            exam_subject: exam.subject.clone(),
            exam_name: exam.subject_name.clone(),
            exam_date: exam.date.clone(),
            exam_time: exam.time.clone(),
            room_id: room.room_id.clone(),
            room_name: room.name.clone(),
            seat_no,
            roll_no: student.roll_no.clone(),
            student_name: student.name.clone(),
            department: student.department.clone(),
        }
    }

    pub fn exam_key(&self) -> String {
        format!("{} - {}", self.exam_subject, self.exam_name)
    }
}
