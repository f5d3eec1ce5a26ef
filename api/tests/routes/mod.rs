mod health_test;
mod quarters_test;
mod sessions_test;
mod students_test;
