use crate::model::{Allocation, ExamSession, Room, Student};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use serde_json::json;
use std::cmp::Reverse;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("no students available; add students first")]
    NoStudentsConfigured,
    #[error("no rooms available; add rooms first")]
    NoRoomsConfigured,
    #[error("no exam sessions available; add exam sessions first")]
    NoExamsConfigured,
    #[error("no students registered for {subject}")]
    NoEligibleStudents { subject: String },
    #[error("not enough capacity: {required} students need seats but only {available} seats available")]
    CapacityExceeded { required: usize, available: usize },
    #[error("exam session not found: {exam_id}")]
    ExamNotFound { exam_id: String },
}

impl AllocError {
    pub fn code(&self) -> &'static str {
        match self {
            AllocError::NoStudentsConfigured => "no_students_configured",
            AllocError::NoRoomsConfigured => "no_rooms_configured",
            AllocError::NoExamsConfigured => "no_exams_configured",
            AllocError::NoEligibleStudents { .. } => "no_eligible_students",
            AllocError::CapacityExceeded { .. } => "capacity_exceeded",
            AllocError::ExamNotFound { .. } => "not_found",
        }
    }

    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AllocError::NoEligibleStudents { subject } => Some(json!({ "subject": subject })),
            AllocError::CapacityExceeded {
                required,
                available,
            } => Some(json!({ "required": required, "available": available })),
            AllocError::ExamNotFound { exam_id } => Some(json!({ "examId": exam_id })),
            _ => None,
        }
    }
}

/// Percentage rounded to one decimal place; zero when `whole` is zero.
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = 100.0 * part as f64 / whole as f64;
    (raw * 10.0).round() / 10.0
}

/// Row letters: A..Z, then AA, AB, ... (bijective base 26).
pub fn row_letters(row: u32) -> String {
    let mut n = row as u64 + 1;
    let mut buf: Vec<u8> = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        buf.push(b'A' + rem);
        n = (n - 1) / 26;
    }
    buf.iter().rev().map(|b| *b as char).collect()
}

/// Zero-based row and column to a label such as `A1` or `C6`.
pub fn seat_label(row: u32, col: u32) -> String {
    format!("{}{}", row_letters(row), col + 1)
}

/// Inverse of [`seat_label`]: returns zero-based `(row, col)`.
pub fn parse_seat_label(label: &str) -> Option<(u32, u32)> {
    let split = label.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = label.split_at(split);
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut row: u32 = 0;
    for b in letters.bytes() {
        row = row.checked_mul(26)?.checked_add((b - b'A') as u32 + 1)?;
    }
    let col: u32 = digits.parse().ok()?;
    if col == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}

/// Students registered for `subject`, in input order.
pub fn eligible_students<'a>(students: &'a [Student], subject: &str) -> Vec<&'a Student> {
    students.iter().filter(|s| s.takes(subject)).collect()
}

/// Rooms by descending capacity. The sort is stable so equal rooms keep input order.
pub fn rooms_by_capacity(rooms: &[Room]) -> Vec<&Room> {
    let mut ordered: Vec<&Room> = rooms.iter().collect();
    ordered.sort_by_key(|r| Reverse(r.capacity));
    ordered
}

pub fn total_capacity(rooms: &[Room]) -> usize {
    rooms.iter().map(|r| r.capacity as usize).sum()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Packing {
    pub records: Vec<Allocation>,
    pub rooms_used: usize,
    pub total_capacity: usize,
}

impl Packing {
    pub fn students(&self) -> usize {
        self.records.len()
    }

    pub fn capacity_utilization(&self) -> f64 {
        percent(self.records.len(), self.total_capacity)
    }
}

/// Seats `candidates` for one exam session across `rooms`.
///
/// Candidates are shuffled, rooms are walked largest first and each room's
/// grid is filled row-major until either the grid or the pool runs out.
/// Nothing is produced when the pool does not fit.
pub fn pack<R>(
    exam: &ExamSession,
    candidates: &[&Student],
    rooms: &[Room],
    rng: &mut R,
) -> Result<Packing, AllocError>
where
    R: Rng + ?Sized,
{
    let mut shuffled: Vec<&Student> = candidates.to_vec();
    shuffled.shuffle(rng);

    let ordered = rooms_by_capacity(rooms);
    let total_capacity = total_capacity(rooms);
    let required = shuffled.len();
    if required > total_capacity {
        return Err(AllocError::CapacityExceeded {
            required,
            available: total_capacity,
        });
    }

    let mut pool = shuffled.into_iter().peekable();
    let mut records: Vec<Allocation> = Vec::with_capacity(required);
    let mut rooms_used = 0usize;

    for room in ordered {
        if pool.peek().is_none() {
            break;
        }
        let before = records.len();
        'grid: for r in 0..room.rows {
            for c in 0..room.seats_per_row {
                let Some(student) = pool.next() else {
                    break 'grid;
                };
                records.push(Allocation::new(exam, room, seat_label(r, c), student));
            }
        }
        let seated = records.len() - before;
        if seated > 0 {
            rooms_used += 1;
            debug!(
                exam_id = %exam.exam_id,
                room_id = %room.room_id,
                seated,
                "filled room"
            );
        }
    }

    // Only reachable when a room's grid is smaller than its declared capacity.
    if pool.next().is_some() {
        return Err(AllocError::CapacityExceeded {
            required,
            available: rooms.iter().map(Room::grid_seats).sum(),
        });
    }

    Ok(Packing {
        records,
        rooms_used,
        total_capacity,
    })
}

/// Single-session run: any failure aborts with no records.
pub fn allocate_session<R>(
    students: &[Student],
    rooms: &[Room],
    exam: &ExamSession,
    rng: &mut R,
) -> Result<Packing, AllocError>
where
    R: Rng + ?Sized,
{
    if students.is_empty() {
        return Err(AllocError::NoStudentsConfigured);
    }
    if rooms.is_empty() {
        return Err(AllocError::NoRoomsConfigured);
    }
    let packing = pack_session(students, rooms, exam, rng)?;
    info!(
        exam_id = %exam.exam_id,
        subject = %exam.subject,
        students = packing.students(),
        rooms_used = packing.rooms_used,
        "seating generated"
    );
    Ok(packing)
}

fn pack_session<R>(
    students: &[Student],
    rooms: &[Room],
    exam: &ExamSession,
    rng: &mut R,
) -> Result<Packing, AllocError>
where
    R: Rng + ?Sized,
{
    let candidates = eligible_students(students, &exam.subject);
    if candidates.is_empty() {
        return Err(AllocError::NoEligibleStudents {
            subject: exam.subject.clone(),
        });
    }
    pack(exam, &candidates, rooms, rng)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub students: usize,
    pub rooms_used: usize,
    pub total_capacity: usize,
}

#[derive(Debug, Clone)]
pub struct SessionResult {
    pub exam_id: String,
    pub subject: String,
    pub outcome: Result<SessionStats, AllocError>,
}

impl SessionResult {
    pub fn summary_line(&self) -> String {
        match &self.outcome {
            Ok(s) => format!(
                "{}: {} students allocated across {} rooms.",
                self.subject, s.students, s.rooms_used
            ),
            Err(AllocError::NoEligibleStudents { .. }) => {
                format!("{}: No students registered", self.subject)
            }
            Err(AllocError::CapacityExceeded {
                required,
                available,
            }) => format!(
                "{}: Not enough capacity ({} students, {} seats)",
                self.subject, required, available
            ),
            Err(e) => format!("{}: {}", self.subject, e),
        }
    }
}

/// Result of seating every exam session in one pass.
#[derive(Debug, Clone)]
pub struct AllocationRun {
    pub allocations: Vec<Allocation>,
    pub sessions: Vec<SessionResult>,
    /// Room capacity summed once per session, since rooms are reused by every session.
    pub offered_seats: usize,
}

impl AllocationRun {
    pub fn students_allocated(&self) -> usize {
        self.allocations.len()
    }

    pub fn distinct_rooms_used(&self) -> usize {
        self.allocations
            .iter()
            .map(|a| a.room_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn skipped_count(&self) -> usize {
        self.sessions.iter().filter(|s| s.outcome.is_err()).count()
    }

    pub fn capacity_utilization(&self) -> f64 {
        percent(self.allocations.len(), self.offered_seats)
    }
}

/// Seats every session independently against the full room list.
///
/// Per-session failures are recorded on the run and the pass continues;
/// only missing students, rooms or exams abort it.
pub fn allocate_all<R>(
    students: &[Student],
    rooms: &[Room],
    exams: &[ExamSession],
    rng: &mut R,
) -> Result<AllocationRun, AllocError>
where
    R: Rng + ?Sized,
{
    if exams.is_empty() {
        return Err(AllocError::NoExamsConfigured);
    }
    if students.is_empty() {
        return Err(AllocError::NoStudentsConfigured);
    }
    if rooms.is_empty() {
        return Err(AllocError::NoRoomsConfigured);
    }

    let mut allocations: Vec<Allocation> = Vec::new();
    let mut sessions: Vec<SessionResult> = Vec::with_capacity(exams.len());

    for exam in exams {
        let outcome = match pack_session(students, rooms, exam, rng) {
            Ok(packing) => {
                let stats = SessionStats {
                    students: packing.students(),
                    rooms_used: packing.rooms_used,
                    total_capacity: packing.total_capacity,
                };
                allocations.extend(packing.records);
                Ok(stats)
            }
            Err(e) => {
                warn!(exam_id = %exam.exam_id, code = e.code(), "skipping session: {e}");
                Err(e)
            }
        };
        sessions.push(SessionResult {
            exam_id: exam.exam_id.clone(),
            subject: exam.subject.clone(),
            outcome,
        });
    }

    let run = AllocationRun {
        allocations,
        sessions,
        offered_seats: total_capacity(rooms) * exams.len(),
    };
    info!(
        sessions = exams.len(),
        skipped = run.skipped_count(),
        students = run.students_allocated(),
        rooms = run.distinct_rooms_used(),
        "all-session seating generated"
    );
    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{HashMap, HashSet};

    fn student(roll: &str, subjects: &[&str]) -> Student {
        Student {
            roll_no: roll.to_string(),
            name: format!("Student {}", roll),
            department: "CSE".to_string(),
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn room(id: &str, capacity: u32, rows: u32, seats_per_row: u32) -> Room {
        Room {
            room_id: id.to_string(),
            name: format!("Room {}", id),
            capacity,
            rows,
            seats_per_row,
        }
    }

    fn exam(id: &str, subject: &str, date: &str, time: &str) -> ExamSession {
        ExamSession {
            exam_id: id.to_string(),
            subject: subject.to_string(),
            subject_name: format!("{} paper", subject),
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    fn math_students(n: usize) -> Vec<Student> {
        (0..n)
            .map(|i| student(&format!("R{:03}", i), &["MATH101"]))
            .collect()
    }

    #[test]
    fn seat_labels_are_row_letter_then_one_based_column() {
        assert_eq!(seat_label(0, 0), "A1");
        assert_eq!(seat_label(2, 5), "C6");
        assert_eq!(seat_label(25, 0), "Z1");
        assert_eq!(seat_label(26, 0), "AA1");
        assert_eq!(seat_label(27, 9), "AB10");
    }

    #[test]
    fn parse_seat_label_inverts_seat_label() {
        for r in [0u32, 1, 25, 26, 51, 52, 700] {
            for c in [0u32, 4, 11] {
                assert_eq!(parse_seat_label(&seat_label(r, c)), Some((r, c)));
            }
        }
        assert_eq!(parse_seat_label("A0"), None);
        assert_eq!(parse_seat_label("a1"), None);
        assert_eq!(parse_seat_label("12"), None);
        assert_eq!(parse_seat_label("A-1"), None);
        assert_eq!(parse_seat_label("A"), None);
    }

    #[test]
    fn eligibility_keeps_input_order() {
        let students = vec![
            student("1", &["MATH101"]),
            student("2", &["PHY101"]),
            student("3", &["PHY101", "MATH101"]),
        ];
        let got: Vec<&str> = eligible_students(&students, "MATH101")
            .iter()
            .map(|s| s.roll_no.as_str())
            .collect();
        assert_eq!(got, vec!["1", "3"]);
        assert!(eligible_students(&students, "CHEM101").is_empty());
    }

    #[test]
    fn rooms_sort_by_capacity_descending_with_stable_ties() {
        let rooms = vec![
            room("small", 4, 2, 2),
            room("big-a", 30, 5, 6),
            room("big-b", 30, 6, 5),
        ];
        let ids: Vec<&str> = rooms_by_capacity(&rooms)
            .iter()
            .map(|r| r.room_id.as_str())
            .collect();
        assert_eq!(ids, vec!["big-a", "big-b", "small"]);
    }

    #[test]
    fn five_students_in_two_by_three_room_fill_a1_to_b2() {
        let students = math_students(5);
        let rooms = vec![room("R1", 6, 2, 3)];
        let ex = exam("EX1", "MATH101", "2025-01-10", "09:00");
        let mut rng = StdRng::seed_from_u64(7);

        let packing = allocate_session(&students, &rooms, &ex, &mut rng).expect("pack");
        assert_eq!(packing.records.len(), 5);
        assert_eq!(packing.rooms_used, 1);

        let seats: HashSet<&str> = packing.records.iter().map(|a| a.seat_no.as_str()).collect();
        let expected: HashSet<&str> = ["A1", "A2", "A3", "B1", "B2"].into_iter().collect();
        assert_eq!(seats, expected);

        let rolls: HashSet<&str> = packing.records.iter().map(|a| a.roll_no.as_str()).collect();
        assert_eq!(rolls.len(), 5);
        assert!((packing.capacity_utilization() - 83.3).abs() < 1e-9);
    }

    #[test]
    fn seven_students_in_six_seats_is_capacity_exceeded() {
        let students = math_students(7);
        let rooms = vec![room("R1", 6, 2, 3)];
        let ex = exam("EX1", "MATH101", "2025-01-10", "09:00");
        let mut rng = StdRng::seed_from_u64(7);

        let err = allocate_session(&students, &rooms, &ex, &mut rng).unwrap_err();
        assert_eq!(
            err,
            AllocError::CapacityExceeded {
                required: 7,
                available: 6
            }
        );
        assert_eq!(err.code(), "capacity_exceeded");
        assert_eq!(err.details().unwrap()["required"], 7);
    }

    #[test]
    fn single_session_preconditions_abort() {
        let ex = exam("EX1", "MATH101", "2025-01-10", "09:00");
        let mut rng = StdRng::seed_from_u64(1);
        let rooms = vec![room("R1", 6, 2, 3)];
        assert_eq!(
            allocate_session(&[], &rooms, &ex, &mut rng).unwrap_err(),
            AllocError::NoStudentsConfigured
        );
        assert_eq!(
            allocate_session(&math_students(2), &[], &ex, &mut rng).unwrap_err(),
            AllocError::NoRoomsConfigured
        );
        let physics = vec![student("P1", &["PHY101"])];
        assert_eq!(
            allocate_session(&physics, &rooms, &ex, &mut rng).unwrap_err(),
            AllocError::NoEligibleStudents {
                subject: "MATH101".to_string()
            }
        );
    }

    #[test]
    fn larger_room_fills_first_and_unreached_rooms_are_not_counted() {
        let students = math_students(10);
        let rooms = vec![
            room("small", 4, 2, 2),
            room("large", 12, 3, 4),
            room("spare", 2, 1, 2),
        ];
        let ex = exam("EX1", "MATH101", "2025-01-10", "09:00");
        let mut rng = StdRng::seed_from_u64(3);

        let packing = pack(
            &ex,
            &eligible_students(&students, "MATH101"),
            &rooms,
            &mut rng,
        )
        .expect("pack");
        assert_eq!(packing.rooms_used, 1);
        assert!(packing.records.iter().all(|a| a.room_id == "large"));
        assert_eq!(packing.total_capacity, 18);
    }

    #[test]
    fn overflow_spills_into_next_room_from_its_first_seat() {
        let students = math_students(8);
        let rooms = vec![room("R1", 6, 2, 3), room("R2", 4, 2, 2)];
        let ex = exam("EX1", "MATH101", "2025-01-10", "09:00");
        let mut rng = StdRng::seed_from_u64(11);

        let packing = allocate_session(&students, &rooms, &ex, &mut rng).expect("pack");
        assert_eq!(packing.rooms_used, 2);
        let r2: HashSet<&str> = packing
            .records
            .iter()
            .filter(|a| a.room_id == "R2")
            .map(|a| a.seat_no.as_str())
            .collect();
        assert_eq!(r2, ["A1", "A2"].into_iter().collect());
    }

    #[test]
    fn undersized_grid_fails_without_partial_output() {
        // Declared capacity 6 but only 4 physical seats.
        let students = math_students(5);
        let rooms = vec![room("R1", 6, 2, 2)];
        let ex = exam("EX1", "MATH101", "2025-01-10", "09:00");
        let mut rng = StdRng::seed_from_u64(5);
        let err = allocate_session(&students, &rooms, &ex, &mut rng).unwrap_err();
        assert_eq!(
            err,
            AllocError::CapacityExceeded {
                required: 5,
                available: 4
            }
        );
    }

    #[test]
    fn allocate_all_skips_failing_sessions_and_continues() {
        let mut students = math_students(4);
        students.push(student("P1", &["PHY101"]));
        students.extend((0..9).map(|i| student(&format!("C{}", i), &["CHEM101"])));
        let rooms = vec![room("R1", 6, 2, 3)];
        let exams = vec![
            exam("EX1", "MATH101", "2025-01-10", "09:00"),
            exam("EX2", "BIO101", "2025-01-11", "09:00"),
            exam("EX3", "CHEM101", "2025-01-12", "09:00"),
            exam("EX4", "PHY101", "2025-01-13", "09:00"),
        ];
        let mut rng = StdRng::seed_from_u64(9);

        let run = allocate_all(&students, &rooms, &exams, &mut rng).expect("run");
        assert_eq!(run.students_allocated(), 5);
        assert_eq!(run.skipped_count(), 2);
        assert_eq!(run.distinct_rooms_used(), 1);
        assert_eq!(run.offered_seats, 24);

        let lines: Vec<String> = run.sessions.iter().map(|s| s.summary_line()).collect();
        assert_eq!(lines[0], "MATH101: 4 students allocated across 1 rooms.");
        assert_eq!(lines[1], "BIO101: No students registered");
        assert_eq!(lines[2], "CHEM101: Not enough capacity (9 students, 6 seats)");
        assert_eq!(lines[3], "PHY101: 1 students allocated across 1 rooms.");
    }

    #[test]
    fn allocate_all_reuses_rooms_for_every_session() {
        let students: Vec<Student> = (0..6)
            .map(|i| student(&format!("S{}", i), &["MATH101", "PHY101"]))
            .collect();
        let rooms = vec![room("R1", 6, 2, 3)];
        let exams = vec![
            exam("EX1", "MATH101", "2025-01-10", "09:00"),
            exam("EX2", "PHY101", "2025-01-10", "14:00"),
        ];
        let mut rng = StdRng::seed_from_u64(2);

        let run = allocate_all(&students, &rooms, &exams, &mut rng).expect("run");
        assert_eq!(run.students_allocated(), 12);
        assert_eq!(run.skipped_count(), 0);
        assert!((run.capacity_utilization() - 100.0).abs() < 1e-9);
        for exam_id in ["EX1", "EX2"] {
            let seats: HashSet<&str> = run
                .allocations
                .iter()
                .filter(|a| a.exam_id == exam_id)
                .map(|a| a.seat_no.as_str())
                .collect();
            assert_eq!(seats.len(), 6);
        }
    }

    #[test]
    fn allocate_all_preconditions() {
        let mut rng = StdRng::seed_from_u64(1);
        let rooms = vec![room("R1", 6, 2, 3)];
        assert_eq!(
            allocate_all(&math_students(1), &rooms, &[], &mut rng).unwrap_err(),
            AllocError::NoExamsConfigured
        );
    }

    fn arb_rooms() -> impl Strategy<Value = Vec<Room>> {
        prop::collection::vec((1u32..6, 1u32..6, 0u32..4), 1..5).prop_map(|dims| {
            dims.into_iter()
                .enumerate()
                .map(|(i, (rows, cols, slack))| {
                    let grid = rows * cols;
                    room(&format!("R{}", i), grid.saturating_sub(slack).max(1), rows, cols)
                })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn pack_respects_capacity_uniqueness_and_grid(
            rooms in arb_rooms(),
            n in 0usize..60,
            seed in any::<u64>(),
        ) {
            let students = math_students(n);
            let ex = exam("EX1", "MATH101", "2025-01-10", "09:00");
            let candidates = eligible_students(&students, "MATH101");
            let mut rng = StdRng::seed_from_u64(seed);
            let cap = total_capacity(&rooms);

            match pack(&ex, &candidates, &rooms, &mut rng) {
                Ok(packing) => {
                    prop_assert!(n <= cap);
                    prop_assert_eq!(packing.records.len(), n);

                    let seats: HashSet<(&str, &str)> = packing
                        .records
                        .iter()
                        .map(|a| (a.room_id.as_str(), a.seat_no.as_str()))
                        .collect();
                    prop_assert_eq!(seats.len(), n);
                    let rolls: HashSet<&str> =
                        packing.records.iter().map(|a| a.roll_no.as_str()).collect();
                    prop_assert_eq!(rolls.len(), n);

                    let by_id: HashMap<&str, &Room> =
                        rooms.iter().map(|r| (r.room_id.as_str(), r)).collect();
                    let mut filled: HashMap<&str, HashSet<(u32, u32)>> = HashMap::new();
                    for a in &packing.records {
                        let r = by_id[a.room_id.as_str()];
                        let (row, col) = parse_seat_label(&a.seat_no).expect("label");
                        prop_assert!(row < r.rows);
                        prop_assert!(col < r.seats_per_row);
                        filled.entry(a.room_id.as_str()).or_default().insert((row, col));
                    }
                    // Row-major: a filled seat implies every earlier seat in the room is filled.
                    for (room_id, seats) in &filled {
                        let r = by_id[room_id];
                        for &(row, col) in seats {
                            let idx = row * r.seats_per_row + col;
                            for earlier in 0..idx {
                                let pos = (earlier / r.seats_per_row, earlier % r.seats_per_row);
                                prop_assert!(seats.contains(&pos));
                            }
                        }
                    }
                    prop_assert_eq!(packing.rooms_used, filled.len());
                }
                Err(AllocError::CapacityExceeded { required, available }) => {
                    prop_assert!(n > cap);
                    prop_assert_eq!(required, n);
                    prop_assert_eq!(available, cap);
                }
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }
        }

        #[test]
        fn eligibility_matches_subject_membership(
            regs in prop::collection::vec(prop::collection::vec(0usize..4, 0..4), 0..20),
            pick in 0usize..4,
        ) {
            let codes = ["MATH101", "PHY101", "CHEM101", "BIO101"];
            let students: Vec<Student> = regs
                .iter()
                .enumerate()
                .map(|(i, subj)| {
                    let subjects: Vec<&str> = subj.iter().map(|&k| codes[k]).collect();
                    student(&format!("S{}", i), &subjects)
                })
                .collect();
            let subject = codes[pick];
            let got: HashSet<&str> = eligible_students(&students, subject)
                .iter()
                .map(|s| s.roll_no.as_str())
                .collect();
            for s in &students {
                prop_assert_eq!(
                    got.contains(s.roll_no.as_str()),
                    s.subjects.iter().any(|x| x == subject)
                );
            }
        }
    }
}
