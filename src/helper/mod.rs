pub mod face_helper;
