//! Request, response and form types for mosaic submissions

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// Smallest tile count the form accepts on either axis
pub const MIN_TILES: u32 = 1;
/// Largest tile count the form accepts on either axis
pub const MAX_TILES: u32 = 500;

/// Color relationship hint passed to the mosaic generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorGroup
{   Analogous
  , Complementary
  , Triadic
  , Monochrome
}

impl ColorGroup
{   pub const ALL: [ColorGroup; 4] = [
      ColorGroup::Analogous
    , ColorGroup::Complementary
    , ColorGroup::Triadic
    , ColorGroup::Monochrome
    ];

    /// Wire name of the group
    pub fn as_str(&self) -> &'static str
    {   match self
        {   ColorGroup::Analogous => "analogous"
          , ColorGroup::Complementary => "complementary"
          , ColorGroup::Triadic => "triadic"
          , ColorGroup::Monochrome => "monochrome"
        }
    }
}

impl Default for ColorGroup
{   fn default() -> Self
    {   ColorGroup::Analogous
    }
}

impl fmt::Display for ColorGroup
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   f.write_str(self.as_str())
    }
}

impl FromStr for ColorGroup
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   let wanted = s.trim().to_ascii_lowercase();
        ColorGroup::ALL
          .iter()
          .copied()
          .find(|g| g.as_str() == wanted)
          .ok_or_else(|| crate::error::Error::InvalidField
          {   field: "colorGroup".to_string()
            , value: s.to_string()
          })
    }
}

/// Body POSTed to the mosaic endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicRequest
{   pub album_name: String
  , pub artist: String
  , pub red: u8
  , pub green: u8
  , pub blue: u8
  , pub color_group: ColorGroup
  , pub x_tiles: u32
  , pub y_tiles: u32
}

/// Mosaic returned by the endpoint; keys are snake_case on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicResponse
{   pub mosaic_url: String
  , pub album_name: String
  , /// Absent from the first generation of the endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>
}

/// Operator input for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MosaicForm
{   pub album_name: String
  , pub artist: String
  , pub red: u8
  , pub green: u8
  , pub blue: u8
  , pub color_group: ColorGroup
  , x_tiles: u32
  , y_tiles: u32
}

impl Default for MosaicForm
{   fn default() -> Self
    {   MosaicForm
        {   album_name: String::new()
          , artist: String::new()
          , red: 0
          , green: 0
          , blue: 0
          , color_group: ColorGroup::default()
          , x_tiles: 50
          , y_tiles: 50
        }
    }
}

impl MosaicForm
{   pub fn x_tiles(&self) -> u32
    {   self.x_tiles
    }

    pub fn y_tiles(&self) -> u32
    {   self.y_tiles
    }

    /// Set the horizontal tile count, clamped to the form bounds
    pub fn set_x_tiles(&mut self, tiles: u32)
    {   self.x_tiles = clamp_tiles(tiles);
    }

    /// Set the vertical tile count, clamped to the form bounds
    pub fn set_y_tiles(&mut self, tiles: u32)
    {   self.y_tiles = clamp_tiles(tiles);
    }

    /// Apply a single field edit
    pub fn apply(&mut self, update: FormUpdate)
    {   match update
        {   FormUpdate::AlbumName(name) => self.album_name = name
          , FormUpdate::Artist(artist) => self.artist = artist
          , FormUpdate::Red(v) => self.red = v
          , FormUpdate::Green(v) => self.green = v
          , FormUpdate::Blue(v) => self.blue = v
          , FormUpdate::ColorGroup(g) => self.color_group = g
          , FormUpdate::XTiles(n) => self.set_x_tiles(n)
          , FormUpdate::YTiles(n) => self.set_y_tiles(n)
        }
    }

    /// Snapshot the current values as a request body
    pub fn to_request(&self) -> MosaicRequest
    {   MosaicRequest
        {   album_name: self.album_name.clone()
          , artist: self.artist.clone()
          , red: self.red
          , green: self.green
          , blue: self.blue
          , color_group: self.color_group
          , x_tiles: self.x_tiles
          , y_tiles: self.y_tiles
        }
    }
}

fn clamp_tiles(tiles: u32) -> u32
{   tiles.clamp(MIN_TILES, MAX_TILES)
}

/// One edit to the operator form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormUpdate
{   AlbumName(String)
  , Artist(String)
  , Red(u8)
  , Green(u8)
  , Blue(u8)
  , ColorGroup(ColorGroup)
  , XTiles(u32)
  , YTiles(u32)
}

impl FormUpdate
{   /// Parse a single `key=value` argument
    ///
    /// An argument without `=` names no field and is reported as unknown.
    pub fn parse_pair(arg: &str)
      -> Result<FormUpdate, crate::error::Error>
    {   let (key, value) = arg.split_once('=')
          .ok_or_else(||
            crate::error::Error::UnknownField(arg.to_string())
          )?;
        FormUpdate::parse(key, value)
    }

    /// Parse a `key=value` style edit, keys use the request's wire names
    pub fn parse(key: &str, value: &str)
      -> Result<FormUpdate, crate::error::Error>
    {   match key
        {   "albumName" => Ok(FormUpdate::AlbumName(value.to_string()))
          , "artist" => Ok(FormUpdate::Artist(value.to_string()))
          , "red" => parse_number(key, value).map(FormUpdate::Red)
          , "green" => parse_number(key, value).map(FormUpdate::Green)
          , "blue" => parse_number(key, value).map(FormUpdate::Blue)
          , "colorGroup" => value.parse().map(FormUpdate::ColorGroup)
          , "xTiles" => parse_number(key, value).map(FormUpdate::XTiles)
          , "yTiles" => parse_number(key, value).map(FormUpdate::YTiles)
          , _ => Err(crate::error::Error::UnknownField(key.to_string()))
        }
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str)
  -> Result<T, crate::error::Error>
{   value.trim().parse::<T>().map_err(|_|
      crate::error::Error::InvalidField
      {   field: key.to_string()
        , value: value.to_string()
      }
    )
}
