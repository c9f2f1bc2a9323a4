use atlaskit_geometry::Rect;
use atlaskit_textures::{Frame, Texture};
use serde::Deserialize;
use smart_default::SmartDefault;

use crate::{AtlasError, AtlasReport};

/// A grid of equally sized frames.
#[derive(Debug, Clone, SmartDefault, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpriteSheetConfig {
    pub frame_width: u32,
    pub frame_height: u32,
    /// First cell to register. Negative values count back from the last cell.
    pub start_frame: i64,
    /// Last cell to register, inclusive. `None` runs to the end of the grid.
    pub end_frame: Option<usize>,
    /// Empty border around the whole grid.
    pub margin: u32,
    /// Empty gap between cells.
    pub spacing: u32,
}

/// Cells selected by `config` within a `width` x `height` area, relative to
/// its top-left corner, in row-major order. Cells overhanging the area are
/// shrunk to fit.
fn grid_cells(
    width: f32,
    height: f32,
    config: &SpriteSheetConfig,
) -> Result<Vec<Rect>, AtlasError> {
    if config.frame_width == 0 || config.frame_height == 0 {
        return Err(AtlasError::Malformed(format!(
            "sprite sheet frames must have a size, got {}x{}",
            config.frame_width, config.frame_height
        )));
    }

    let frame_size = [config.frame_width as f32, config.frame_height as f32];
    let margin = config.margin as f32;
    let spacing = config.spacing as f32;

    let columns = ((width - margin + spacing) / (frame_size[0] + spacing)).floor();
    let rows = ((height - margin + spacing) / (frame_size[1] + spacing)).floor();
    let total = (columns.max(0.) * rows.max(0.)) as usize;

    let start = match config.start_frame {
        s if s >= 0 && s as usize <= total => s as usize,
        s if s < 0 && s.unsigned_abs() as usize <= total => total - s.unsigned_abs() as usize,
        _ => 0,
    };
    let end = match config.end_frame {
        Some(end) if end >= start && end < total => end,
        _ => total.saturating_sub(1),
    };

    let mut cells = Vec::new();
    let mut cell = [margin, margin];

    for i in 0..total {
        if (start..=end).contains(&i) {
            let w = frame_size[0] - (cell[0] + frame_size[0] - width).max(0.);
            let h = frame_size[1] - (cell[1] + frame_size[1] - height).max(0.);
            cells.push(Rect::new(cell[0], cell[1], w, h));
        }

        cell[0] += frame_size[0] + spacing;
        if cell[0] + frame_size[0] > width {
            cell = [margin, cell[1] + frame_size[1] + spacing];
        }
    }

    Ok(cells)
}

fn warn_if_empty(texture: &Texture, cells: &[Rect], config: &SpriteSheetConfig) {
    if cells.is_empty() {
        log::warn!(
            "Sprite sheet of \"{}\" fits no {}x{} frames",
            texture.key(),
            config.frame_width,
            config.frame_height
        );
    }
}

fn skip(report: &mut AtlasReport, name: String, error: AtlasError) {
    log::warn!("Skipping sprite sheet frame \"{name}\": {error}");
    report.skipped.push((name, error));
}

/// Cuts `region` of a source into a grid of frames named "0", "1", ... in
/// row-major order. Cells overhanging the region are shrunk to fit.
pub fn parse_sprite_sheet(
    texture: &mut Texture,
    source_index: usize,
    region: Rect,
    config: &SpriteSheetConfig,
) -> Result<AtlasReport, AtlasError> {
    let cells = grid_cells(region.width, region.height, config)?;
    texture.source(source_index)?;
    warn_if_empty(texture, &cells, config);

    let mut report = AtlasReport::default();
    for (i, cell) in cells.into_iter().enumerate() {
        let name = i.to_string();
        let cut = cell.translate(region.x, region.y);

        match texture.add_frame(name.clone(), source_index, cut) {
            Ok(_) => report.added.push(name),
            Err(e) => skip(&mut report, name, e.into()),
        }
    }

    Ok(report)
}

/// Cuts an existing frame into a grid, the way `parse_sprite_sheet` cuts a
/// region. `frame` must come from a texture whose source `source_index` has
/// the same size as the one `frame` was cut from.
///
/// A trimmed frame is gridded over its untrimmed size. Each cell keeps the
/// full cell size as its logical size and is trimmed down to the packed
/// pixels it overlaps. Cells over transparent border only are skipped, the
/// names of the others still follow the grid.
pub fn parse_sprite_sheet_from_frame(
    texture: &mut Texture,
    source_index: usize,
    frame: &Frame,
    config: &SpriteSheetConfig,
) -> Result<AtlasReport, AtlasError> {
    if frame.rotated() {
        return Err(AtlasError::Malformed(format!(
            "frame \"{}\" is rotated, sprite sheets can't be cut from it",
            frame.name()
        )));
    }

    let trim = match frame.trim() {
        Some(trim) => *trim,
        None => return parse_sprite_sheet(texture, source_index, frame.cut(), config),
    };

    let cells = grid_cells(frame.width(), frame.height(), config)?;
    texture.source(source_index)?;
    warn_if_empty(texture, &cells, config);

    let packed = trim.sprite_source_size;
    let cut = frame.cut();
    let mut report = AtlasReport::default();

    for (i, cell) in cells.into_iter().enumerate() {
        let name = i.to_string();

        let visible = cell.intersection(&packed);
        if visible.is_empty() {
            let reason = "the cell only covers trimmed-away pixels".to_owned();
            skip(
                &mut report,
                name.clone(),
                AtlasError::MalformedEntry { name, reason },
            );
            continue;
        }

        let sheet_cut = visible.translate(cut.x - packed.x, cut.y - packed.y);
        let dest = visible.translate(-cell.x, -cell.y);

        let added = texture
            .create_frame(name.clone(), source_index, sheet_cut)
            .and_then(|mut sheet_frame| {
                sheet_frame.set_trim(cell.width, cell.height, dest)?;
                texture.insert_frame(sheet_frame)
            });

        match added {
            Ok(_) => report.added.push(name),
            Err(e) => skip(&mut report, name, e.into()),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use atlaskit_textures::TextureSource;

    use super::*;

    fn texture() -> Texture {
        Texture::new("sheet", [TextureSource::new(64, 48)]).unwrap()
    }

    fn config(frame_width: u32, frame_height: u32) -> SpriteSheetConfig {
        SpriteSheetConfig {
            frame_width,
            frame_height,
            ..Default::default()
        }
    }

    #[test]
    fn test_grid() {
        let mut texture = texture();
        let region = texture.source(0).unwrap().bounds();

        let report = parse_sprite_sheet(&mut texture, 0, region, &config(16, 16)).unwrap();

        assert_eq!(report.added.len(), 12);
        assert_eq!(texture.frame("0").unwrap().cut(), Rect::new(0., 0., 16., 16.));
        assert_eq!(texture.frame("3").unwrap().cut(), Rect::new(48., 0., 16., 16.));
        assert_eq!(texture.frame("4").unwrap().cut(), Rect::new(0., 16., 16., 16.));
        assert_eq!(texture.frame("11").unwrap().cut(), Rect::new(48., 32., 16., 16.));
        assert_eq!(texture.first_frame(), "0");
    }

    #[test]
    fn test_margin_and_spacing() {
        let mut texture = texture();
        let region = texture.source(0).unwrap().bounds();
        let config = SpriteSheetConfig {
            margin: 1,
            spacing: 2,
            ..config(20, 20)
        };

        let report = parse_sprite_sheet(&mut texture, 0, region, &config).unwrap();

        // (64 - 1 + 2) / 22 = 2 columns, (48 - 1 + 2) / 22 = 2 rows
        assert_eq!(report.added.len(), 4);
        assert_eq!(texture.frame("1").unwrap().cut(), Rect::new(23., 1., 20., 20.));
        assert_eq!(texture.frame("2").unwrap().cut(), Rect::new(1., 23., 20., 20.));
    }

    #[test]
    fn test_frame_range() {
        let mut texture = texture();
        let region = texture.source(0).unwrap().bounds();
        let config = SpriteSheetConfig {
            start_frame: 2,
            end_frame: Some(4),
            ..config(16, 16)
        };

        parse_sprite_sheet(&mut texture, 0, region, &config).unwrap();

        assert_eq!(texture.frame_names(false), vec!["0", "1", "2"]);
        assert_eq!(texture.frame("0").unwrap().cut(), Rect::new(32., 0., 16., 16.));

        let mut texture = self::texture();
        let config = SpriteSheetConfig {
            start_frame: -2,
            ..self::config(16, 16)
        };
        parse_sprite_sheet(&mut texture, 0, region, &config).unwrap();
        assert_eq!(texture.frame("0").unwrap().cut(), Rect::new(32., 32., 16., 16.));
        assert_eq!(texture.frame_total(), 3);
    }

    #[test]
    fn test_sub_region() {
        let mut texture = texture();
        let report =
            parse_sprite_sheet(&mut texture, 0, Rect::new(32., 16., 32., 32.), &config(16, 16))
                .unwrap();

        assert_eq!(report.added.len(), 4);
        assert_eq!(texture.frame("0").unwrap().cut(), Rect::new(32., 16., 16., 16.));
        assert_eq!(texture.frame("3").unwrap().cut(), Rect::new(48., 32., 16., 16.));
    }

    #[test]
    fn test_from_untrimmed_frame() {
        let atlas = Texture::new("atlas", [TextureSource::new(64, 64)]).unwrap();
        let frame = atlas.create_frame("row", 0, Rect::new(16., 16., 32., 16.)).unwrap();

        let mut texture = Texture::new("sheet", [TextureSource::new(64, 64)]).unwrap();
        let report =
            parse_sprite_sheet_from_frame(&mut texture, 0, &frame, &config(16, 16)).unwrap();

        assert_eq!(report.added, vec!["0", "1"]);
        assert_eq!(texture.frame("1").unwrap().cut(), Rect::new(32., 16., 16., 16.));
    }

    #[test]
    fn test_from_trimmed_frame() {
        // 24x16 of pixels at 10,10 sit at 4,0 of a 48x16 strip of three cells
        let atlas = Texture::new("atlas", [TextureSource::new(64, 64)]).unwrap();
        let mut frame = atlas
            .create_frame("row", 0, Rect::new(10., 10., 24., 16.))
            .unwrap();
        frame.set_trim(48., 16., Rect::new(4., 0., 24., 16.)).unwrap();

        let mut texture = Texture::new("sheet", [TextureSource::new(64, 64)]).unwrap();
        let report =
            parse_sprite_sheet_from_frame(&mut texture, 0, &frame, &config(16, 16)).unwrap();

        assert_eq!(report.added, vec!["0", "1"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, "2");

        let first = texture.frame("0").unwrap();
        assert_eq!(first.cut(), Rect::new(10., 10., 12., 16.));
        assert_eq!((first.width(), first.height()), (16., 16.));
        assert_eq!(first.trim().unwrap().sprite_source_size, Rect::new(4., 0., 12., 16.));

        let second = texture.frame("1").unwrap();
        assert_eq!(second.cut(), Rect::new(22., 10., 12., 16.));
        assert_eq!(second.trim().unwrap().sprite_source_size, Rect::new(0., 0., 12., 16.));
    }

    #[test]
    fn test_from_rotated_frame() {
        let atlas = Texture::new("atlas", [TextureSource::new(64, 64)]).unwrap();
        let mut frame = atlas.create_frame("r", 0, Rect::new(0., 0., 16., 32.)).unwrap();
        frame.set_rotated(true);

        let mut texture = Texture::new("sheet", [TextureSource::new(64, 64)]).unwrap();
        assert!(matches!(
            parse_sprite_sheet_from_frame(&mut texture, 0, &frame, &config(16, 16)),
            Err(AtlasError::Malformed(_))
        ));
        assert_eq!(texture.frame_total(), 1);
    }

    #[test]
    fn test_zero_frame_size() {
        let mut texture = texture();
        let region = texture.source(0).unwrap().bounds();

        assert!(matches!(
            parse_sprite_sheet(&mut texture, 0, region, &config(0, 16)),
            Err(AtlasError::Malformed(_))
        ));
    }
}
