/// Ports module defining the interfaces between the application core and
/// the outside world (server session, filesystem, console, clock).
pub mod outbound;
