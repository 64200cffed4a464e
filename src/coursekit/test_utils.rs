use crate::config::CourseConfig;
use crate::model::{Module, Resource};
use crate::store::mem_backend::MemBackend;
use crate::store::CourseStore;

/// An empty course on an in-memory backend.
pub fn mem_course() -> CourseStore<MemBackend> {
    course_on(MemBackend::new())
}

pub fn course_on(backend: MemBackend) -> CourseStore<MemBackend> {
    CourseStore::open(backend, &CourseConfig::default()).expect("in-memory store opens")
}

/// Module "Week 1" (`m1`) and a top-level "Syllabus" link (`r1`).
pub fn week_one_course() -> CourseStore<MemBackend> {
    let mut store = mem_course();
    store
        .modules_mut()
        .add(Module::new("Week 1").with_id("m1"))
        .expect("module adds");
    store
        .resources_mut()
        .add(Resource::link("Syllabus", "https://x.edu").with_id("r1"))
        .expect("resource adds");
    store
}
