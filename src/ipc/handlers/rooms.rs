use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{db_conn, db_failed, required_positive, required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::Room;
use serde_json::json;

fn handle_rooms_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return ok(&req.id, json!({ "rooms": [] }));
    };
    match db::list_rooms(conn) {
        Ok(rooms) => {
            let total: u64 = rooms.iter().map(|r| r.capacity as u64).sum();
            ok(&req.id, json!({ "rooms": rooms, "totalCapacity": total }))
        }
        Err(e) => db_failed(req, "db_query_failed", e),
    }
}

fn parse_room(req: &Request) -> Result<Room, serde_json::Value> {
    let room = Room {
        room_id: required_str(req, "roomId")?,
        name: required_str(req, "name")?,
        capacity: required_positive(req, "capacity")?,
        rows: required_positive(req, "rows")?,
        seats_per_row: required_positive(req, "seatsPerRow")?,
    };
    // The packer walks the grid, so it must be able to hold the declared capacity.
    if room.grid_seats() < room.capacity as usize {
        return Err(err(
            &req.id,
            "bad_params",
            format!(
                "rows x seatsPerRow ({}) is smaller than capacity ({})",
                room.grid_seats(),
                room.capacity
            ),
            Some(json!({ "gridSeats": room.grid_seats(), "capacity": room.capacity })),
        ));
    }
    // A row or column past capacity can never be reached, and report grids
    // are laid out at full size.
    if room.rows > room.capacity || room.seats_per_row > room.capacity {
        return Err(err(
            &req.id,
            "bad_params",
            format!(
                "rows ({}) and seatsPerRow ({}) must not exceed capacity ({})",
                room.rows, room.seats_per_row, room.capacity
            ),
            Some(json!({
                "rows": room.rows,
                "seatsPerRow": room.seats_per_row,
                "capacity": room.capacity
            })),
        ));
    }
    Ok(room)
}

fn handle_rooms_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let room = match parse_room(req) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    match db::room_exists(conn, &room.room_id) {
        Ok(true) => {
            return err(
                &req.id,
                "duplicate",
                format!("room {} already exists", room.room_id),
                Some(json!({ "roomId": room.room_id })),
            )
        }
        Ok(false) => {}
        Err(e) => return db_failed(req, "db_query_failed", e),
    }
    match db::insert_room(conn, &room) {
        Ok(()) => ok(&req.id, json!({ "roomId": room.room_id, "room": room })),
        Err(e) => db_failed(req, "db_insert_failed", e),
    }
}

fn handle_rooms_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let conn = match db_conn(state, req) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let room_id = match required_str(req, "roomId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match db::delete_room(conn, &room_id) {
        Ok(0) => err(&req.id, "not_found", "room not found", None),
        Ok(_) => ok(&req.id, json!({ "roomId": room_id })),
        Err(e) => db_failed(req, "db_delete_failed", e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "rooms.list" => Some(handle_rooms_list(state, req)),
        "rooms.create" => Some(handle_rooms_create(state, req)),
        "rooms.delete" => Some(handle_rooms_delete(state, req)),
        _ => None,
    }
}
