//! TypeScript bindings for the console shell are generated by `build.rs`
//! into `generated/typescript`.
