//! Static deployment artifacts.
//!
//! Four files are written verbatim into the working directory on every run:
//! the PHP-FPM image definition, a sample entry point, the stack descriptor
//! and the nginx configuration. There is no templating.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A file written verbatim into the working directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Asset {
    /// File name relative to the working directory.
    pub name: &'static str,
    /// Exact file contents.
    pub contents: &'static str,
}

/// Image definition for the PHP-FPM service.
pub const DOCKERFILE: Asset = Asset {
    name: "Dockerfile-php",
    contents: "\
FROM php:7.4-fpm
RUN docker-php-ext-install mysqli pdo pdo_mysql
COPY index.php /var/www/html/index.php
",
};

/// Sample application entry point.
pub const INDEX_PHP: Asset = Asset {
    name: "index.php",
    contents: "\
<?php
phpinfo();
?>
",
};

/// Stack descriptor: mysql, php-fpm (3 replicas) and nginx on one overlay network.
pub const COMPOSE: Asset = Asset {
    name: "docker-compose.yml",
    contents: "\
version: '3.8'

services:
  mysql:
    image: mysql:5.7
    environment:
      MYSQL_ROOT_PASSWORD: root
      MYSQL_DATABASE: appdb
      MYSQL_USER: user
      MYSQL_PASSWORD: password
    networks:
      - minha_rede

  php-fpm:
    image: php-fpm:latest  # Substitua com a imagem criada manualmente
    deploy:
      replicas: 3
    networks:
      - minha_rede

  nginx:
    image: nginx:latest
    volumes:
      - ./nginx.conf:/etc/nginx/nginx.conf
    ports:
      - \"80:80\"
    depends_on:
      - php-fpm
    networks:
      - minha_rede

networks:
  minha_rede:
    driver: overlay
",
};

/// Reverse proxy in front of the PHP-FPM upstream.
pub const NGINX_CONF: Asset = Asset {
    name: "nginx.conf",
    contents: "\
events {}

http {
    upstream php_fpm_backend {
        server php-fpm:9000;
    }

    server {
        listen 80;

        location / {
            fastcgi_pass php_fpm_backend;
            fastcgi_index index.php;
            fastcgi_param SCRIPT_FILENAME /var/www/html/index.php;
            include fastcgi_params;
        }
    }
}
",
};

/// All artifacts, in write order.
pub const ASSETS: [Asset; 4] = [DOCKERFILE, INDEX_PHP, COMPOSE, NGINX_CONF];

impl Asset {
    /// Path of this asset inside `dir`.
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.name)
    }

    /// Overwrite the file inside `dir` with the literal contents.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = self.path_in(dir);
        fs::write(&path, self.contents).map_err(|e| Error::io(&path, e))?;
        log::debug!("wrote {}", path.display());
        Ok(path)
    }

    /// Current state of the file inside `dir`.
    pub fn state(&self, dir: &Path) -> AssetState {
        match fs::read_to_string(self.path_in(dir)) {
            Ok(current) if current == self.contents => AssetState::Current,
            Ok(_) => AssetState::Drifted,
            Err(_) => AssetState::Missing,
        }
    }
}

/// State of an asset on disk compared to its literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetState {
    /// File matches byte for byte.
    Current,
    /// File exists with other contents.
    Drifted,
    /// File is absent or unreadable.
    Missing,
}

/// Write all four artifacts into `dir`, overwriting existing files.
///
/// Stops at the first IO failure; files written before it stay in place.
pub fn materialize(dir: &Path) -> Result<Vec<PathBuf>> {
    ASSETS.iter().map(|asset| asset.write(dir)).collect()
}

/// State of every artifact inside `dir`.
pub fn inspect(dir: &Path) -> Vec<(Asset, AssetState)> {
    ASSETS
        .iter()
        .map(|asset| (*asset, asset.state(dir)))
        .collect()
}
