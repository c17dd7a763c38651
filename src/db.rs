use crate::model::{Allocation, ExamSession, Room, Student};
use rusqlite::{Connection, OptionalExtension, Row};
use std::path::Path;

pub const DB_FILE_NAME: &str = "examseat.sqlite3";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE_NAME);
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS students(
            roll_no TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            department TEXT NOT NULL,
            subjects TEXT NOT NULL,
            sort_order INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS rooms(
            room_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            capacity INTEGER NOT NULL,
            row_count INTEGER NOT NULL,
            seats_per_row INTEGER NOT NULL,
            sort_order INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS exams(
            exam_id TEXT PRIMARY KEY,
            subject TEXT NOT NULL,
            subject_name TEXT NOT NULL,
            date TEXT NOT NULL,
            time TEXT NOT NULL,
            sort_order INTEGER NOT NULL
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_exams_slot ON exams(subject, date, time)",
        [],
    )?;

    // Allocation rows are denormalized snapshots; they survive edits to the
    // source records until seating is regenerated.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS allocations(
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            exam_id TEXT NOT NULL,
            exam_subject TEXT NOT NULL,
            exam_name TEXT NOT NULL,
            exam_date TEXT NOT NULL,
            exam_time TEXT NOT NULL,
            room_id TEXT NOT NULL,
            room_name TEXT NOT NULL,
            seat_no TEXT NOT NULL,
            roll_no TEXT NOT NULL,
            student_name TEXT NOT NULL,
            department TEXT NOT NULL,
            UNIQUE(exam_id, room_id, seat_no),
            UNIQUE(exam_id, roll_no)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_allocations_exam ON allocations(exam_id)",
        [],
    )?;

    Ok(conn)
}

fn next_sort_order(conn: &Connection, table: &str) -> anyhow::Result<i64> {
    let sql = format!("SELECT COALESCE(MAX(sort_order), -1) + 1 FROM {}", table);
    Ok(conn.query_row(&sql, [], |r| r.get(0))?)
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<(String, String, String, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

pub fn list_students(conn: &Connection) -> anyhow::Result<Vec<Student>> {
    let mut stmt = conn.prepare(
        "SELECT roll_no, name, department, subjects FROM students ORDER BY sort_order",
    )?;
    let raw = stmt
        .query_map([], student_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = Vec::with_capacity(raw.len());
    for (roll_no, name, department, subjects_json) in raw {
        let subjects: Vec<String> = serde_json::from_str(&subjects_json)?;
        out.push(Student {
            roll_no,
            name,
            department,
            subjects,
        });
    }
    Ok(out)
}

pub fn student_exists(conn: &Connection, roll_no: &str) -> anyhow::Result<bool> {
    Ok(conn
        .query_row("SELECT 1 FROM students WHERE roll_no = ?", [roll_no], |r| {
            r.get::<_, i64>(0)
        })
        .optional()?
        .is_some())
}

pub fn insert_student(conn: &Connection, s: &Student) -> anyhow::Result<()> {
    let sort_order = next_sort_order(conn, "students")?;
    conn.execute(
        "INSERT INTO students(roll_no, name, department, subjects, sort_order)
         VALUES(?, ?, ?, ?, ?)",
        (
            &s.roll_no,
            &s.name,
            &s.department,
            serde_json::to_string(&s.subjects)?,
            sort_order,
        ),
    )?;
    Ok(())
}

pub fn delete_student(conn: &Connection, roll_no: &str) -> anyhow::Result<usize> {
    Ok(conn.execute("DELETE FROM students WHERE roll_no = ?", [roll_no])?)
}

pub fn list_rooms(conn: &Connection) -> anyhow::Result<Vec<Room>> {
    let mut stmt = conn.prepare(
        "SELECT room_id, name, capacity, row_count, seats_per_row FROM rooms ORDER BY sort_order",
    )?;
    let rooms = stmt
        .query_map([], |r| {
            Ok(Room {
                room_id: r.get(0)?,
                name: r.get(1)?,
                capacity: r.get(2)?,
                rows: r.get(3)?,
                seats_per_row: r.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rooms)
}

pub fn room_exists(conn: &Connection, room_id: &str) -> anyhow::Result<bool> {
    Ok(conn
        .query_row("SELECT 1 FROM rooms WHERE room_id = ?", [room_id], |r| {
            r.get::<_, i64>(0)
        })
        .optional()?
        .is_some())
}

pub fn insert_room(conn: &Connection, room: &Room) -> anyhow::Result<()> {
    let sort_order = next_sort_order(conn, "rooms")?;
    conn.execute(
        "INSERT INTO rooms(room_id, name, capacity, row_count, seats_per_row, sort_order)
         VALUES(?, ?, ?, ?, ?, ?)",
        (
            &room.room_id,
            &room.name,
            room.capacity,
            room.rows,
            room.seats_per_row,
            sort_order,
        ),
    )?;
    Ok(())
}

pub fn delete_room(conn: &Connection, room_id: &str) -> anyhow::Result<usize> {
    Ok(conn.execute("DELETE FROM rooms WHERE room_id = ?", [room_id])?)
}

fn exam_from_row(r: &Row<'_>) -> rusqlite::Result<ExamSession> {
    Ok(ExamSession {
        exam_id: r.get(0)?,
        subject: r.get(1)?,
        subject_name: r.get(2)?,
        date: r.get(3)?,
        time: r.get(4)?,
    })
}

pub fn list_exams(conn: &Connection) -> anyhow::Result<Vec<ExamSession>> {
    let mut stmt = conn.prepare(
        "SELECT exam_id, subject, subject_name, date, time FROM exams ORDER BY sort_order",
    )?;
    let exams = stmt
        .query_map([], exam_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(exams)
}

pub fn get_exam(conn: &Connection, exam_id: &str) -> anyhow::Result<Option<ExamSession>> {
    Ok(conn
        .query_row(
            "SELECT exam_id, subject, subject_name, date, time FROM exams WHERE exam_id = ?",
            [exam_id],
            exam_from_row,
        )
        .optional()?)
}

/// True when a session for the same subject is already scheduled in this slot.
pub fn exam_slot_taken(
    conn: &Connection,
    subject: &str,
    date: &str,
    time: &str,
) -> anyhow::Result<bool> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM exams WHERE subject = ? AND date = ? AND time = ?",
            (subject, date, time),
            |r| r.get::<_, i64>(0),
        )
        .optional()?
        .is_some())
}

pub fn insert_exam(conn: &Connection, exam: &ExamSession) -> anyhow::Result<()> {
    let sort_order = next_sort_order(conn, "exams")?;
    conn.execute(
        "INSERT INTO exams(exam_id, subject, subject_name, date, time, sort_order)
         VALUES(?, ?, ?, ?, ?, ?)",
        (
            &exam.exam_id,
            &exam.subject,
            &exam.subject_name,
            &exam.date,
            &exam.time,
            sort_order,
        ),
    )?;
    Ok(())
}

/// Removes the session together with any seating generated for it.
pub fn delete_exam(conn: &Connection, exam_id: &str) -> anyhow::Result<usize> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM allocations WHERE exam_id = ?", [exam_id])?;
    let n = tx.execute("DELETE FROM exams WHERE exam_id = ?", [exam_id])?;
    tx.commit()?;
    Ok(n)
}

pub fn list_allocations(
    conn: &Connection,
    exam_id: Option<&str>,
) -> anyhow::Result<Vec<Allocation>> {
    let mut stmt = conn.prepare(
        "SELECT exam_id, exam_subject, exam_name, exam_date, exam_time,
                room_id, room_name, seat_no, roll_no, student_name, department
         FROM allocations
         WHERE (?1 IS NULL OR exam_id = ?1)
         ORDER BY seq",
    )?;
    let rows = stmt
        .query_map([exam_id], |r| {
            Ok(Allocation {
                exam_id: r.get(0)?,
                exam_subject: r.get(1)?,
                exam_name: r.get(2)?,
                exam_date: r.get(3)?,
                exam_time: r.get(4)?,
                room_id: r.get(5)?,
                room_name: r.get(6)?,
                seat_no: r.get(7)?,
                roll_no: r.get(8)?,
                student_name: r.get(9)?,
                department: r.get(10)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn insert_allocations(conn: &Connection, records: &[Allocation]) -> anyhow::Result<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO allocations(
            exam_id, exam_subject, exam_name, exam_date, exam_time,
            room_id, room_name, seat_no, roll_no, student_name, department)
         VALUES(?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )?;
    for a in records {
        stmt.execute((
            &a.exam_id,
            &a.exam_subject,
            &a.exam_name,
            &a.exam_date,
            &a.exam_time,
            &a.room_id,
            &a.room_name,
            &a.seat_no,
            &a.roll_no,
            &a.student_name,
            &a.department,
        ))?;
    }
    Ok(())
}

/// Swaps one session's seating for `records` atomically.
pub fn replace_exam_allocations(
    conn: &Connection,
    exam_id: &str,
    records: &[Allocation],
) -> anyhow::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM allocations WHERE exam_id = ?", [exam_id])?;
    insert_allocations(&tx, records)?;
    tx.commit()?;
    Ok(())
}

/// Swaps the whole allocation list for `records` atomically.
pub fn replace_all_allocations(conn: &Connection, records: &[Allocation]) -> anyhow::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM allocations", [])?;
    insert_allocations(&tx, records)?;
    tx.commit()?;
    Ok(())
}

pub fn clear_allocations(conn: &Connection) -> anyhow::Result<usize> {
    Ok(conn.execute("DELETE FROM allocations", [])?)
}

pub fn clear_all(conn: &Connection) -> anyhow::Result<()> {
    let tx = conn.unchecked_transaction()?;
    for table in ["allocations", "exams", "rooms", "students"] {
        tx.execute(&format!("DELETE FROM {}", table), [])?;
    }
    tx.commit()?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub students: i64,
    pub rooms: i64,
    pub exams: i64,
    pub allocations: i64,
}

pub fn counts(conn: &Connection) -> anyhow::Result<Counts> {
    let count = |table: &str| -> anyhow::Result<i64> {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))?)
    };
    Ok(Counts {
        students: count("students")?,
        rooms: count("rooms")?,
        exams: count("exams")?,
        allocations: count("allocations")?,
    })
}
