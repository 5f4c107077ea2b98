/// Capability to ask the host for an image (file picker, camera, URL prompt).
///
/// The editor never encodes or transfers files; it only records the
/// reference the host hands back.
pub trait UploadTrigger {
    /// Reference to the chosen image, or `None` if the owner cancelled
    fn request_image(&self) -> Option<String>;
}

impl<F> UploadTrigger for F
where
    F: Fn() -> Option<String>,
{
    fn request_image(&self) -> Option<String> {
        self()
    }
}
