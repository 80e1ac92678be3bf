pub const EXAMPLE_IMAGE_URL: &str = "https://cdn.tgdd.vn/hoi-dap/1369909/200-anh-lam-slide-powerpoint-cuc-dep-chuyen-nghiep-khong%20(3).jpg";

/// Whether the "Draw" button may be used for the typed URL.
pub fn can_start(url: &str) -> bool {
    !url.trim().is_empty()
}
