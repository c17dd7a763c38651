use crate::model::{Allocation, Room};
use crate::seating::{parse_seat_label, percent};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// Groups records by key, keeping the order in which keys first appear.
fn group_first_seen<'a, K, I, F>(items: I, key: F) -> Vec<(K, Vec<&'a Allocation>)>
where
    I: IntoIterator<Item = &'a Allocation>,
    K: Eq + Hash + Clone,
    F: Fn(&Allocation) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&Allocation>)> = Vec::new();
    for item in items {
        let k = key(item);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }
    groups
}

/// Orders seat labels by grid position (`A2` before `A10`); unparseable labels sort last.
fn seat_order(a: &str, b: &str) -> Ordering {
    match (parse_seat_label(a), parse_seat_label(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatCell {
    pub seat_no: String,
    pub roll_no: String,
    pub student_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomChart {
    pub room_id: String,
    pub room_name: String,
    pub rows: u32,
    pub seats_per_row: u32,
    pub student_count: usize,
    /// `grid[row][col]`; `None` marks an empty seat.
    pub grid: Vec<Vec<Option<SeatCell>>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamChart {
    pub exam_id: String,
    pub exam_key: String,
    pub exam_date: String,
    pub exam_time: String,
    pub rooms: Vec<RoomChart>,
}

/// Room-wise seat grids per exam session. Rooms missing from `rooms` are left out.
pub fn room_charts(
    allocations: &[Allocation],
    rooms: &[Room],
    exam_id: Option<&str>,
) -> Vec<ExamChart> {
    let by_id: HashMap<&str, &Room> = rooms.iter().map(|r| (r.room_id.as_str(), r)).collect();
    let mut out = Vec::new();

    for (id, records) in group_first_seen(allocations, |a| a.exam_id.clone()) {
        if exam_id.is_some_and(|want| want != id) {
            continue;
        }
        let first = records[0];
        let mut charts = Vec::new();
        let per_room = group_first_seen(records.iter().copied(), |a| a.room_id.clone());
        for (room_id, seats) in per_room {
            let Some(room) = by_id.get(room_id.as_str()) else {
                continue;
            };
            let mut grid: Vec<Vec<Option<SeatCell>>> =
                vec![vec![None; room.seats_per_row as usize]; room.rows as usize];
            for a in &seats {
                let Some((r, c)) = parse_seat_label(&a.seat_no) else {
                    continue;
                };
                if r < room.rows && c < room.seats_per_row {
                    grid[r as usize][c as usize] = Some(SeatCell {
                        seat_no: a.seat_no.clone(),
                        roll_no: a.roll_no.clone(),
                        student_name: a.student_name.clone(),
                    });
                }
            }
            charts.push(RoomChart {
                room_id: room.room_id.clone(),
                room_name: room.name.clone(),
                rows: room.rows,
                seats_per_row: room.seats_per_row,
                student_count: seats.len(),
                grid,
            });
        }
        out.push(ExamChart {
            exam_id: id,
            exam_key: first.exam_key(),
            exam_date: first.exam_date.clone(),
            exam_time: first.exam_time.clone(),
            rooms: charts,
        });
    }
    out
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub serial: usize,
    pub roll_no: String,
    pub student_name: String,
    pub department: String,
    pub seat_no: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceGroup {
    pub exam_key: String,
    pub entries: Vec<AttendanceEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRoom {
    pub room_id: String,
    pub room_name: String,
    pub total_students: usize,
    pub exams: Vec<AttendanceGroup>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSlot {
    pub date: String,
    pub time: String,
    pub rooms: Vec<AttendanceRoom>,
}

/// Attendance sheets: date/time slots in sorted order, then rooms, then one
/// signing list per exam with entries in seat order.
pub fn attendance_sheets(allocations: &[Allocation]) -> Vec<AttendanceSlot> {
    let mut slots = group_first_seen(allocations, |a| {
        (a.exam_date.clone(), a.exam_time.clone())
    });
    slots.sort_by(|a, b| a.0.cmp(&b.0));

    slots
        .into_iter()
        .map(|((date, time), records)| {
            let rooms = group_first_seen(records.iter().copied(), |a| a.room_id.clone())
                .into_iter()
                .map(|(room_id, in_room)| {
                    let exams = group_first_seen(in_room.iter().copied(), |a| a.exam_key())
                        .into_iter()
                        .map(|(exam_key, mut list)| {
                            list.sort_by(|x, y| seat_order(&x.seat_no, &y.seat_no));
                            let entries = list
                                .into_iter()
                                .enumerate()
                                .map(|(i, a)| AttendanceEntry {
                                    serial: i + 1,
                                    roll_no: a.roll_no.clone(),
                                    student_name: a.student_name.clone(),
                                    department: a.department.clone(),
                                    seat_no: a.seat_no.clone(),
                                })
                                .collect();
                            AttendanceGroup { exam_key, entries }
                        })
                        .collect();
                    AttendanceRoom {
                        room_id,
                        room_name: in_room[0].room_name.clone(),
                        total_students: in_room.len(),
                        exams,
                    }
                })
                .collect();
            AttendanceSlot { date, time, rooms }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketExam {
    pub subject: String,
    pub subject_name: String,
    pub date: String,
    pub time: String,
    pub room_id: String,
    pub room_name: String,
    pub seat_no: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HallTicket {
    pub roll_no: String,
    pub student_name: String,
    pub department: String,
    /// Set when the ticket covers more than one exam.
    pub consolidated: bool,
    pub exams: Vec<TicketExam>,
}

/// One ticket per student, exams ordered by date then time.
pub fn hall_tickets(allocations: &[Allocation], roll_no: Option<&str>) -> Vec<HallTicket> {
    group_first_seen(allocations, |a| a.roll_no.clone())
        .into_iter()
        .filter(|(roll, _)| roll_no.map_or(true, |want| want == roll.as_str()))
        .map(|(roll, records)| {
            let first = records[0];
            let mut exams: Vec<TicketExam> = records
                .iter()
                .map(|a| TicketExam {
                    subject: a.exam_subject.clone(),
                    subject_name: a.exam_name.clone(),
                    date: a.exam_date.clone(),
                    time: a.exam_time.clone(),
                    room_id: a.room_id.clone(),
                    room_name: a.room_name.clone(),
                    seat_no: a.seat_no.clone(),
                })
                .collect();
            exams.sort_by(|x, y| (&x.date, &x.time).cmp(&(&y.date, &y.time)));
            HallTicket {
                roll_no: roll,
                student_name: first.student_name.clone(),
                department: first.department.clone(),
                consolidated: exams.len() > 1,
                exams,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationLevel {
    High,
    Medium,
    Low,
}

impl UtilizationLevel {
    pub fn from_percent(p: f64) -> Self {
        if p > 80.0 {
            UtilizationLevel::High
        } else if p > 50.0 {
            UtilizationLevel::Medium
        } else {
            UtilizationLevel::Low
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentShare {
    pub department: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUtilization {
    pub room_id: String,
    pub name: String,
    pub capacity: u32,
    pub sessions: usize,
    pub seats_filled: usize,
    /// Most students seated in this room by any single session.
    pub peak_used: usize,
    pub available: usize,
    pub utilization: f64,
    pub status: UtilizationLevel,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamEnrollment {
    pub exam_key: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_allocations: usize,
    pub departments: Vec<DepartmentShare>,
    pub rooms: Vec<RoomUtilization>,
    pub exams: Vec<ExamEnrollment>,
}

pub fn statistics(allocations: &[Allocation], rooms: &[Room]) -> Statistics {
    let total = allocations.len();
    let departments = group_first_seen(allocations, |a| a.department.clone())
        .into_iter()
        .map(|(department, list)| DepartmentShare {
            department,
            count: list.len(),
            percent: percent(list.len(), total),
        })
        .collect();

    let by_id: HashMap<&str, &Room> = rooms.iter().map(|r| (r.room_id.as_str(), r)).collect();
    let room_stats = group_first_seen(allocations, |a| a.room_id.clone())
        .into_iter()
        .map(|(room_id, list)| {
            let capacity = by_id.get(room_id.as_str()).map_or(0, |r| r.capacity);
            let per_session = group_first_seen(list.iter().copied(), |a| a.exam_id.clone());
            let peak_used = per_session.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
            let utilization = percent(peak_used, capacity as usize);
            RoomUtilization {
                name: list[0].room_name.clone(),
                room_id,
                capacity,
                sessions: per_session.len(),
                seats_filled: list.len(),
                peak_used,
                available: (capacity as usize).saturating_sub(peak_used),
                utilization,
                status: UtilizationLevel::from_percent(utilization),
            }
        })
        .collect();

    let exams = group_first_seen(allocations, |a| a.exam_key())
        .into_iter()
        .map(|(exam_key, list)| ExamEnrollment {
            exam_key,
            count: list.len(),
        })
        .collect();

    Statistics {
        total_allocations: total,
        departments,
        rooms: room_stats,
        exams,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanExam {
    pub exam_key: String,
    pub exam_date: String,
    pub exam_time: String,
    pub rows: Vec<Allocation>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatingPlan {
    pub generated_at: String,
    pub total_allocations: usize,
    pub total_rooms: usize,
    pub exams: Vec<PlanExam>,
}

pub fn seating_plan(allocations: &[Allocation], generated_at: String) -> SeatingPlan {
    let total_rooms = group_first_seen(allocations, |a| a.room_id.clone()).len();
    let exams = group_first_seen(allocations, |a| a.exam_key())
        .into_iter()
        .map(|(exam_key, list)| PlanExam {
            exam_key,
            exam_date: list[0].exam_date.clone(),
            exam_time: list[0].exam_time.clone(),
            rows: list.into_iter().cloned().collect(),
        })
        .collect();
    SeatingPlan {
        generated_at,
        total_allocations: allocations.len(),
        total_rooms,
        exams,
    }
}
