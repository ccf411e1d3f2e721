//! Trimmed copies of the listing site's markup.

/// Search page: three valid entries, two malformed, pagination to page 2
pub const SEARCH_PAGE: &str = r##"<!DOCTYPE html>
<html><body class="search">
<div class="cover-items">
  <div class="cover-item category">
    <div class="cover-item-image">
      <a href="https://steamunlocked.org/diablo-free-download/">
        <img src="data:image/gif;base64,R0lGOD" data-src="https://steamunlocked.org/wp-content/uploads/diablo.jpg">
      </a>
    </div>
    <div class="cover-item-title">
      <a href="https://steamunlocked.org/diablo-free-download/"><h1>Diablo  Free Download</h1></a>
    </div>
    <div class="cover-item-category"><a href="/category/rpg/" rel="category tag">RPG</a></div>
  </div>
  <div class="cover-item category">
    <div class="cover-item-image"><img src="/wp-content/uploads/no-title.jpg"></div>
  </div>
  <div class="cover-item category">
    <div class="cover-item-title">
      <a href="/diablo-ii-resurrected-free-download/"><h1>Diablo II: Resurrected Free Download</h1></a>
    </div>
  </div>
  <div class="cover-item category">
    <div class="cover-item-title"><a href="#"><h1>Broken link</h1></a></div>
  </div>
  <div class="cover-item category">
    <div class="cover-item-image"><a href="/diablo-iv-free-download/"><img src="/wp-content/uploads/d4.jpg"></a></div>
    <div class="cover-item-title"><a href="/diablo-iv-free-download/">Diablo IV Free Download</a></div>
  </div>
</div>
<div class="pagination">
  <a class="page-numbers current" href="https://steamunlocked.org/page/1/?s=diablo">1</a>
  <a class="page-numbers" href="https://steamunlocked.org/page/2/?s=diablo">2</a>
</div>
</body></html>"##;

/// A-Z page using the popular-item layout with lazy-loaded thumbnails
pub const AZ_PAGE: &str = r##"<html><body>
<div class="su-pop-items">
  <div class="su-pop-item">
    <div class="img"><img src="/blank.gif" data-wpfc-original-src="https://steamunlocked.org/wp-content/uploads/abzu.jpg"></div>
    <div class="info"><a href="https://steamunlocked.org/abzu-free-download/">ABZU Free Download</a></div>
  </div>
  <div class="su-pop-item">
    <div class="img"><img src="/blank.gif"></div>
    <div class="info"><a href="https://steamunlocked.org/alan-wake-free-download/">Alan Wake Free Download</a></div>
  </div>
  <div class="su-pop-item">
    <div class="info"></div>
  </div>
</div>
<nav><a href="https://steamunlocked.org/all-games/?letter=a&page=3">3</a></nav>
</body></html>"##;

/// Listing page without any result blocks
pub const EMPTY_PAGE: &str = r##"<html><body><p>Nothing Found</p></body></html>"##;

/// Full game page: requirements, screenshots, metadata and repeated mirrors
pub const DETAIL_PAGE: &str = r##"<!DOCTYPE html>
<html><head>
<meta property="og:title" content="Diablo Free Download">
<meta property="og:image" content="https://steamunlocked.org/wp-content/uploads/diablo-og.jpg">
</head>
<body class="post-template-default single">
<article>
  <h1 class="entry-title">Diablo Free Download</h1>
  <img class="attachment-post-thumbnail wp-post-image featured" src="/wp-content/uploads/diablo.jpg">
  <div class="entry-content">
    <p>Diablo is an action role-playing   hack and slash game.</p>
    <p>Descend into the depths beneath Tristram.</p>
    <p>Download Diablo for PC using the link below. <a class="btn-download" href="https://uploadhaven.com/download/0123abcd">Download</a> (1.2 GB)</p>
    <div class="gallery">
      <img src="https://steamunlocked.org/wp-content/uploads/shot1.jpg">
      <img data-src="https://steamunlocked.org/wp-content/uploads/shot2.jpg" src="data:image/gif;base64,AAAA">
      <img src="https://steamunlocked.org/wp-content/uploads/shot1.jpg">
    </div>
    <h2>System Requirements</h2>
    <ul>
      <li><strong>Minimum:</strong></li>
      <li>Requires a 64-bit processor and operating system</li>
      <li>OS: Windows 10</li>
      <li>Processor: Intel Core i5</li>
      <li>Memory: 8 GB RAM</li>
      <li>Graphics: GTX 970</li>
      <li>Storage: 2 GB available space</li>
      <li><strong>Recommended:</strong></li>
      <li>OS: Windows 11</li>
      <li>Memory: 16 GB RAM</li>
    </ul>
    <ul class="game-info">
      <li><strong>Developer:</strong> Blizzard North</li>
      <li><strong>Publisher:</strong> Blizzard Entertainment</li>
      <li><strong>Release Date:</strong> 31 Dec, 1996</li>
    </ul>
  </div>
  <div class="download-area">
    <p>Mirror: <a href="https://megaup.net/abc/diablo.zip">MegaUp</a></p>
    <p>Again: <a href="https://uploadhaven.com/download/0123abcd">UploadHaven</a></p>
    <p>Help: <a href="https://steamunlocked.org/how-to-download/">How to download</a></p>
  </div>
  <footer><a href="/category/action/" rel="category tag">Action</a> <a href="/category/rpg/" rel="category tag">RPG</a></footer>
</article>
</body></html>"##;

/// Game page with a title and nothing else
pub const BARE_DETAIL_PAGE: &str = r##"<html><body>
<h1>Tiny Game Free Download</h1>
<div class="entry-content"><p>A small game.</p></div>
</body></html>"##;

/// Requirements given in a dedicated container, `<br>` separated
pub const CONTAINER_REQUIREMENTS_PAGE: &str = r##"<html><body>
<h1>Other Game</h1>
<div class="system-requirements">
  <p><strong>Minimum:</strong><br>OS: Windows 7<br>CPU: Dual core<br>RAM: 4 GB</p>
  <p><strong>Recommended:</strong><br>OS: Windows 10<br>GPU: GTX 1060<br>Hard Drive: 10 GB</p>
</div>
</body></html>"##;

/// Only the heading carries a requirements class
pub const STYLED_HEADING_PAGE: &str = r##"<html><body>
<h1>Styled Game</h1>
<h2 class="system-requirements-title">System Requirements</h2>
<ul>
  <li>OS: Windows 10</li>
  <li>Memory: 8 GB</li>
</ul>
</body></html>"##;

/// Download button pointing at a host nobody knows
pub const UNKNOWN_MIRROR_PAGE: &str = r##"<html><body>
<h1>Drifted Game</h1>
<p>Download Drifted Game for PC using the link below.
  <a class="btn-download" href="https://files.newhost.example/get/42">Download</a></p>
</body></html>"##;

/// WordPress 404 template
pub const NOT_FOUND_PAGE: &str = r##"<html><body class="error404">
<h1>Page not found</h1>
</body></html>"##;

/// Page where the layout changed completely
pub const DRIFTED_PAGE: &str = r##"<html><body><div id="app"></div></body></html>"##;
