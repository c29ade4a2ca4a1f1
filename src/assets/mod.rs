pub(crate) mod icon_svg;
