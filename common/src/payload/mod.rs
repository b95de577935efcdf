pub mod csv;
pub mod meta;

use serde::{Deserialize, Serialize};

/// `GST_CLOCK_TIME_NONE`, stored when a buffer carries no timestamp.
pub const PTS_NONE: u64 = u64::MAX;

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Batch {
    #[prost(message, repeated, tag = "1")]
    pub frames: Vec<Frame>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Frame {
    #[prost(int32, tag = "1")]
    pub frame_num: i32,
    #[prost(uint64, tag = "2")]
    pub pts: u64,
    #[prost(message, repeated, tag = "3")]
    pub people: Vec<Person>,
    #[prost(float, tag = "4")]
    pub sum_danger: f32,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, ::prost::Message)]
pub struct Person {
    #[prost(uint32, tag = "1")]
    pub uid: u32,
    #[prost(bool, tag = "2")]
    pub is_danger: bool,
    #[prost(float, tag = "3")]
    pub danger_val: f32,
    #[prost(message, optional, tag = "4")]
    pub bbox: Option<BBox>,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ::prost::Message)]
pub struct BBox {
    #[prost(int32, tag = "1")]
    pub left: i32,
    #[prost(int32, tag = "2")]
    pub top: i32,
    #[prost(int32, tag = "3")]
    pub width: i32,
    #[prost(int32, tag = "4")]
    pub height: i32,
}

impl Frame {
    pub fn violations(&self) -> impl Iterator<Item = &Person> {
        self.people.iter().filter(|person| person.is_danger)
    }
}
