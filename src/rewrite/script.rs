//! Client-side touch-point reporter.
//!
//! Reads `navigator.maxTouchPoints` and attaches it as `X-DV-Touch-Points` to
//! every `fetch` call, every `XMLHttpRequest`, and every POST form submission
//! (as a hidden field) made by the page.

/// Script block spliced into HTML responses.
///
/// Ends with its own `</body>`: the injector replaces the page's closing tag
/// with this payload rather than inserting in front of it.
pub const TOUCH_POINTS_SCRIPT: &str = r#"
<script>
(function(){
  const tp = navigator.maxTouchPoints || 0;

  const origFetch = window.fetch;
  window.fetch = function(input, init){
    init = init || {};
    init.headers = init.headers || {};
    init.headers['X-DV-Touch-Points'] = tp.toString();
    return origFetch(input, init);
  };

  const origXhrOpen = XMLHttpRequest.prototype.open;
  XMLHttpRequest.prototype.open = function(){
    this.addEventListener('readystatechange', function(){
      this.setRequestHeader('X-DV-Touch-Points', tp.toString());
    }, false);
    origXhrOpen.apply(this, arguments);
  };

  document.addEventListener('submit', function(e){
    const form = e.target;
    if(form.method.toLowerCase() === 'post'){
      let input = document.createElement('input');
      input.type = 'hidden';
      input.name = 'X-DV-Touch-Points';
      input.value = tp.toString();
      form.appendChild(input);
    }
  }, true);
})();
</script>
</body>"#;
