use egui::Pos2;

/// Distance from `point` to the segment `start..end`
pub fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let line_vec = end - start;
    let point_vec = point - start;

    let length_sq = line_vec.length_sq();
    if length_sq == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / length_sq).clamp(0.0, 1.0);
    let projection = start + line_vec * t;
    (point - projection).length()
}
