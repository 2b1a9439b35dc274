use std::io;
use std::path::Path;

use crate::models::{ClothesCategory, ClothesGallery, GalleryImages};

pub const PERSON_DIR: &str = "sample-person";
pub const CLOTHES_DIR: &str = "clothes";

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// (directory name, display label)
const CLOTHES_CATEGORIES: [(&str, &str); 3] =
    [("tops", "Tops"), ("bottom", "Bottoms"), ("set", "Sets")];

fn is_image_file(name: &str) -> bool {
    if name.starts_with('.') {
        return false;
    }
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Image file names in `dir`, sorted. A missing directory is empty.
async fn list_images(dir: &Path) -> io::Result<Vec<String>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if is_image_file(name) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

pub async fn person_images(public_dir: &Path) -> io::Result<GalleryImages> {
    let images = list_images(&public_dir.join(PERSON_DIR))
        .await?
        .into_iter()
        .map(|name| format!("/{}/{}", PERSON_DIR, name))
        .collect();
    Ok(GalleryImages { images })
}

async fn category(root: &Path, dir: &str, label: &str) -> io::Result<ClothesCategory> {
    let images = list_images(&root.join(dir))
        .await?
        .into_iter()
        .map(|name| format!("/{}/{}/{}", CLOTHES_DIR, dir, name))
        .collect();
    Ok(ClothesCategory {
        label: label.to_string(),
        images,
    })
}

pub async fn clothes_images(public_dir: &Path) -> io::Result<ClothesGallery> {
    let root = public_dir.join(CLOTHES_DIR);
    let [(tops, tops_label), (bottom, bottom_label), (set, set_label)] = CLOTHES_CATEGORIES;
    Ok(ClothesGallery {
        tops: category(&root, tops, tops_label).await?,
        bottom: category(&root, bottom, bottom_label).await?,
        set: category(&root, set, set_label).await?,
    })
}

fn empty_category(label: &str) -> ClothesCategory {
    ClothesCategory {
        label: label.to_string(),
        images: Vec::new(),
    }
}

/// Shape returned when the clothes directory cannot be read.
pub fn empty_clothes() -> ClothesGallery {
    let [tops, bottom, set] = CLOTHES_CATEGORIES.map(|(_, label)| empty_category(label));
    ClothesGallery { tops, bottom, set }
}
