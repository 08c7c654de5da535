//! Test-only fixtures: a legacy service source and a tempdir project layout.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Relative path the fixtures place the service file at (the tool's default
/// target).
pub const FIXTURE_TARGET: &str = "src/services/dropboxUploadService.ts";

/// A legacy service source: every mangled log prefix, the legacy upload
/// block, and the unthreaded helper signature.
pub fn legacy_service_source() -> String {
    LEGACY_SERVICE.to_string()
}

/// Legacy source with the upload function renamed so the block pattern
/// cannot match.
pub fn service_source_without_upload_block() -> String {
    LEGACY_SERVICE.replace("uploadFileToDropbox", "uploadFileToVault")
}

const LEGACY_SERVICE: &str = r#"interface DropboxUploadResult {
  url: string;
  publicId?: string;
  resourceType: string;
  fileName: string;
  fileSize: number;
}

const getFileType = (file: File): string => {
  if (file.type.startsWith('audio/')) return 'audio';
  if (file.type.startsWith('video/')) return 'video';
  if (file.type.startsWith('image/')) return 'image';
  return 'raw';
};

const readFileAsDataUrl = (file: File): Promise<string> =>
  new Promise((resolve, reject) => {
    const reader = new FileReader();
    reader.onload = () => resolve(reader.result as string);
    reader.onerror = () => reject(reader.error);
    reader.readAsDataURL(file);
  });

export const uploadFileToDropbox = async (file: File): Promise<DropboxUploadResult> => {
  console.log('?? Starting Dropbox file upload:', {
    fileName: file.name,
    fileType: file.type,
    fileSize: file.size,
    resourceType: getFileType(file)
  });

  const uploadCandidates = ['/api/dropbox-upload', 'http://localhost:3001/api/dropbox-upload'];

  let lastErr: any = null;
  let dataUrl: string | null = null;

  for (const url of uploadCandidates) {
    try {
      if (!dataUrl) {
        dataUrl = await readFileAsDataUrl(file);
      }

      console.log(`?? Attempting Dropbox upload via: ${url}`);

      const resp = await fetch(url, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ fileName: file.name, fileData: dataUrl })
      });

      if (!resp.ok) {
        console.warn(`? Dropbox upload failed: ${resp.status}`);
        lastErr = new Error(`Dropbox upload failed: ${resp.status}`);
        continue;
      }

      const json = await resp.json();
      if (json.url) {
        console.log('?? Dropbox upload successful:', json.url);
        return {
          url: json.url,
          resourceType: getFileType(file),
          fileName: file.name,
          fileSize: file.size
        };
      }

      console.warn('? Dropbox response missing URL:', json);
      lastErr = new Error('Dropbox response missing URL');
    } catch (err) {
      console.error('? Dropbox upload error:', err);
      lastErr = err;
    }
  }

  try {
    console.log('?? Attempting client-side Dropbox upload...');
    return await uploadToDropboxDirect(file);
  } catch (clientErr) {
    lastErr = clientErr;
  }

  throw lastErr || new Error('Dropbox upload failed via all methods');
};

const uploadToDropboxDirect = async (file: File): Promise<DropboxUploadResult> => {
  const accessToken = import.meta.env.VITE_DROPBOX_ACCESS_TOKEN;
  if (!accessToken) {
    throw new Error('Dropbox access token not configured.');
  }

  const response = await fetch('https://content.dropboxapi.com/2/files/upload', {
    method: 'POST',
    headers: {
      'Authorization': `Bearer ${accessToken}`,
      'Content-Type': 'application/octet-stream',
      'Dropbox-API-Arg': JSON.stringify({ path: `/uploads/${file.name}`, mode: 'add', autorename: true })
    },
    body: file
  });

  const metadata = await response.json();
  console.log('?? File uploaded to Dropbox:', metadata.path_display);

  const share = await createShareLink(accessToken, metadata.path_display);
  console.log('?? Shareable link created:', share);

  return {
    url: share,
    publicId: metadata.path_display,
    resourceType: getFileType(file),
    fileName: file.name,
    fileSize: file.size
  };
};

const createShareLink = async (accessToken: string, path: string): Promise<string> => {
  const resp = await fetch('https://api.dropboxapi.com/2/sharing/create_shared_link_with_settings', {
    method: 'POST',
    headers: {
      'Authorization': `Bearer ${accessToken}`,
      'Content-Type': 'application/json'
    },
    body: JSON.stringify({ path })
  });

  if (!resp.ok) {
    console.error('? Dropbox share link creation failed:', resp.status);
    throw new Error('share link creation failed');
  }

  const json = await resp.json();
  return json.url.replace('dl=0', 'raw=1');
};

export type { DropboxUploadResult };
"#;

/// Tempdir-backed project containing one service file at [`FIXTURE_TARGET`].
pub struct TargetFixture {
    temp: TempDir,
}

impl TargetFixture {
    /// Create a project rooted in a tempdir with `source` at the fixture
    /// path.
    pub fn with_source(source: &str) -> Result<Self> {
        let temp = TempDir::new().context("create tempdir")?;
        let target = temp.path().join(FIXTURE_TARGET);
        let parent = target.parent().context("fixture target has no parent")?;
        fs::create_dir_all(parent).context("create fixture dirs")?;
        fs::write(&target, source).context("write fixture target")?;
        Ok(Self { temp })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn target_path(&self) -> PathBuf {
        self.temp.path().join(FIXTURE_TARGET)
    }

    pub fn read_target(&self) -> String {
        fs::read_to_string(self.target_path()).expect("read fixture target")
    }
}
